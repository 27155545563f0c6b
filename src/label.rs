/// Known class labels and their display form.
const DECORATED_LABELS: &[(&str, &str)] = &[
    ("Cat", "Cat 🐱"),
    ("Dog", "Dog 🐶"),
    ("Wild", "Wild Animal 🐻"),
];

/// Decorates a raw class label for display.
///
/// Labels outside the known set are returned unchanged.
pub fn format_label(label: &str) -> &str {
    DECORATED_LABELS
        .iter()
        .find(|(key, _)| *key == label)
        .map_or(label, |(_, decorated)| *decorated)
}
