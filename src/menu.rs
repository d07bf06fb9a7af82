//! Main-menu model: the nickname field and its transient warning.

pub const MAX_NICKNAME_LEN: usize = 15;

#[derive(Clone, Debug, Default)]
pub struct Menu {
    nickname: String,
    warning: Option<String>,
    warning_left: f32,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character if it is allowed and there is room. Typing clears any
    /// warning being shown.
    pub fn type_char(&mut self, c: char) {
        self.clear_warning();
        if self.nickname.chars().count() >= MAX_NICKNAME_LEN {
            return;
        }
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            self.nickname.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.clear_warning();
        self.nickname.pop();
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn set_nickname(&mut self, nickname: &str) {
        self.nickname.clear();
        for c in nickname.chars() {
            self.type_char(c);
        }
    }

    /// Show `message` for `seconds`.
    pub fn display_warning(&mut self, message: impl Into<String>, seconds: f32) {
        self.warning = Some(message.into());
        self.warning_left = seconds;
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Count the warning down; it disappears when its time runs out.
    pub fn update(&mut self, dt: f32) {
        if self.warning.is_none() {
            return;
        }
        self.warning_left -= dt;
        if self.warning_left <= 0.0 {
            self.clear_warning();
        }
    }

    fn clear_warning(&mut self) {
        self.warning = None;
        self.warning_left = 0.0;
    }
}
