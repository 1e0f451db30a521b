use crate::error::BoxError;

/// A persistent, ordered, bidirectional message connection to the robot.
pub trait Transport: Send {
    /// Send one text message, blocking until the transport has accepted it.
    fn send_text(&mut self, text: &str) -> Result<(), BoxError>;

    /// Close the connection.
    fn close(&mut self) -> Result<(), BoxError>;
}
