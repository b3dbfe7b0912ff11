use colored::Colorize;

pub struct Theme {
    pub prompt: String,
    pub error_style: Box<dyn Fn(String) -> String>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            prompt: String::from(": "),
            error_style: Box::new(|s| s.bright_red().to_string()),
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self, message: impl Into<String>) -> String {
        (self.error_style)(message.into())
    }
}
