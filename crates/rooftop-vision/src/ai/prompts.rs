//! Prompts for the roof analysis model
//!
//! The model is asked for a single JSON object so the reply can be parsed
//! without guessing; free text is still accepted as a fallback.

pub const SYSTEM_PROMPT: &str = "You are an expert in assessing rooftops for solar installation \
from aerial imagery. Report only what is visible in the image, clearly and concisely.";

/// Instruction sent together with the image
pub fn build_roof_prompt() -> String {
    let mut prompt = String::new();
    prompt.push_str("Examine the aerial image and describe every rooftop you can see.\n");
    prompt.push_str("For each rooftop cover:\n");
    prompt.push_str("- approximate area in square meters\n");
    prompt.push_str("- orientation in degrees from north\n");
    prompt.push_str("- shading or obstacles (trees, chimneys, vents, neighbouring buildings)\n");
    prompt.push_str("- roof type (flat, pitched, ...)\n");
    prompt.push_str("- space that is free for solar panels\n");
    prompt.push_str("- anything else relevant to an installation\n");
    prompt.push_str("Base the answer on the image only; do not give generic advice.\n\n");
    prompt.push_str("Reply with one JSON object and nothing else:\n");
    prompt.push_str("{\"description\": \"<your assessment>\", \"confidence\": <0.0-1.0>}\n");
    prompt.push_str("where confidence is how sure you are that the image shows rooftops clearly enough to assess.");
    prompt
}
