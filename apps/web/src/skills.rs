/// Splits the comma-separated skills input into a list, trimming each item
/// and dropping empty ones.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Inverse used to pre-fill the skills input from a stored list.
pub fn join_skills(skills: &[String]) -> String {
    skills.join(", ")
}
