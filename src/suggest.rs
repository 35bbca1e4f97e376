use crate::catalog::Route;
use crate::reflection::ReflectionAnswers;

/// Route ids suggested for these answers, in catalog order.
///
/// Plain keyword matching: a route is suggested when any of its tags
/// occurs as a substring of the student's combined answer text,
/// case-insensitively. No weighting and no ranking; matching is
/// boolean.
pub fn suggested_route_ids(routes: &[Route], answers: &ReflectionAnswers) -> Vec<String> {
    let text = answers.concatenated_text().to_lowercase();
    if text.is_empty() {
        return Vec::new();
    }
    routes
        .iter()
        .filter(|route| route.tags.iter().any(|tag| text.contains(tag.as_str())))
        .map(|route| route.id.clone())
        .collect()
}
