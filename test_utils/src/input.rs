//! An [`InputSource`] whose state is set directly by a test.

use coyote::{InputCode, InputSource};

/// Device state for a single frame.
///
/// Codes added with [`ScriptedInput::pressing`] are both held and newly
/// pressed; [`ScriptedInput::holding`] marks a code held without an edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedInput {
    held: Vec<InputCode>,
    pressed: Vec<InputCode>,
}

impl ScriptedInput {
    /// No input at all.
    ///
    /// # Examples
    /// ```
    /// use coyote::{InputCode, InputSource};
    /// use test_utils::ScriptedInput;
    /// assert!(!ScriptedInput::idle().any_held(&[InputCode::SPACE]));
    /// ```
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Adds a code that went down this frame.
    #[must_use]
    pub fn pressing(mut self, code: InputCode) -> Self {
        self.pressed.push(code);
        self.held.push(code);
        self
    }

    /// Adds a code held since an earlier frame.
    #[must_use]
    pub fn holding(mut self, code: InputCode) -> Self {
        self.held.push(code);
        self
    }

    /// The same held codes with this frame's presses forgotten.
    #[must_use]
    pub fn next_frame(&self) -> Self {
        Self {
            held: self.held.clone(),
            pressed: Vec::new(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn any_held(&self, codes: &[InputCode]) -> bool {
        codes.iter().any(|code| self.held.contains(code))
    }

    fn any_pressed(&self, codes: &[InputCode]) -> bool {
        codes.iter().any(|code| self.pressed.contains(code))
    }
}
