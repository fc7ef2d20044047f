//! The fixed catalog instruction sent with every generation request.

/// Instruction text describing the studio catalog transformation.
///
/// Sent verbatim with every request; there is no override.
pub const CATALOG_PROMPT: &str = "Isolate the product in this photograph exactly as it is: \
keep its shape, proportions, materials, textures, stitching, labels and every fine detail \
unchanged, and do not add, remove or redesign any part of it. Completely discard the original \
background and surroundings. Composite the product into a clean, professional photography \
studio on a seamless, softly graded neutral backdrop. Light it with classic three-point studio \
lighting: a large soft key light at roughly 45 degrees to one side, a gentle fill light on the \
opposite side to open up the shadows, and a subtle rim light from behind to separate the \
product's edges from the background. Preserve the product's true colors with exact color \
fidelity; do not shift hue, saturation or white balance. Add a soft, realistic contact shadow \
directly beneath the product so it sits naturally grounded on the surface. The final image \
must look like a high-end e-commerce catalog photograph.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_covers_requirements() {
        let lower = CATALOG_PROMPT.to_lowercase();
        for needle in [
            "isolate",
            "background",
            "studio",
            "three-point",
            "key light",
            "fill light",
            "rim light",
            "color fidelity",
            "shadow",
        ] {
            assert!(lower.contains(needle), "prompt is missing {needle:?}");
        }
    }
}
