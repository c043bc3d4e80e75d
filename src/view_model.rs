//! The [`ViewModel`] trait for the MVVM architecture.

use crate::app::Message;

/// Game-facing half of a screen in the MVVM architecture.
pub trait ViewModel {
    /// Applies `message` to the model. A returned message is handed back to the
    /// application, e.g. [`Message::Quit`].
    fn update(&mut self, message: Message) -> Option<Message>;
}
