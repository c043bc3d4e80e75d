//! The [`View`] trait for the MVVM architecture.
use iced::{Element, Subscription};

use crate::app::Message;

/// A screen: routes messages to its view model, draws itself and names the event
/// streams it listens to.
pub trait View {
    fn update(&mut self, message: Message) -> Option<Message>;

    fn view(&self) -> Element<Message>;

    fn subscription(&self) -> Subscription<Message>;
}
