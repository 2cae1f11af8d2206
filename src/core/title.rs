/// Receives the display title whenever settings are saved or loaded.
pub trait TitleSink {
    fn set_title(&mut self, title: &str);
}

/// Keeps the most recent title in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTitle {
    current: String,
}

impl DocumentTitle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &str {
        &self.current
    }
}

impl TitleSink for DocumentTitle {
    fn set_title(&mut self, title: &str) {
        self.current.clear();
        self.current.push_str(title);
    }
}
