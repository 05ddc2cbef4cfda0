// context key synthesis
//a rule or condition owns at most 16 contexts, named `<base>Context`, `<base>1Context` ... `<base>15Context`.
//the workbook never lists them explicitly, so the candidate key space is rebuilt here.

pub const CONTEXT_KEY_SUFFIX: &str = "Context";
pub const MAX_CONTEXT_INDEX: usize = 15;

/// Candidate FOR CONTEXT keys for `base`, ordered by suffix index.
pub fn synthesize_keys(base: &str) -> Vec<String> {
    (0..=MAX_CONTEXT_INDEX)
        .map(|i| {
            if i == 0 {
                format!("{base}{CONTEXT_KEY_SUFFIX}")
            } else {
                format!("{base}{i}{CONTEXT_KEY_SUFFIX}")
            }
        })
        .collect()
}
