/// Shown for any path outside the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundPage {
    pub path: String,
}

impl NotFoundPage {
    pub const CODE: &'static str = "404";
    pub const MESSAGE: &'static str = "Oops! We couldn't find that page";
    pub const RETURN_LABEL: &'static str = "Return to Home";

    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}
