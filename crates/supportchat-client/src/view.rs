use supportchat_types::MessageEntry;

/// Presentation layer driven by the chat client.
pub trait ChatView {
    /// Append one entry to the visible transcript and scroll to it.
    fn append(&mut self, entry: &MessageEntry);

    /// Remove every entry from the visible transcript.
    fn clear_transcript(&mut self);

    /// Empty the message input, if the view has one.
    fn clear_input(&mut self) {}

    /// Ask the user a yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;
}
