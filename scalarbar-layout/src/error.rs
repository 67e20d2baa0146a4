/// The text property families a layout pass needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TextRole {
    Title,
    Label,
    Annotation,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Missing color source")]
    MissingColorSource,

    #[error("Missing {0} text property")]
    MissingTextProperty(TextRole),
}
