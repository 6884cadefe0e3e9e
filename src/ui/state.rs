/// Local UI state: the text fields that are not part of the chat itself.
#[derive(Debug, Default)]
pub struct UiState {
    pub username_input: String,
    pub input_text: String,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget whatever was typed, e.g. when the session changes hands.
    pub fn reset(&mut self) {
        self.username_input.clear();
        self.input_text.clear();
    }
}
