/// The instruction sent alongside every recipe photo.
///
/// It asks the model for a single JSON object with a `sections` array so
/// multi-part recipes (cake and frosting, soup and croutons) keep their
/// structure. Loaded from `prompt.txt` at compile time.
pub const RECIPE_SCAN_PROMPT: &str = include_str!("prompt.txt");
