use core::fmt::{Debug, Display, Formatter};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// Every slot is occupied.
    Full,
    /// No slot is occupied.
    Empty,
    /// The allocator refused to hold a copy of the payload.
    OutOfMemory { requested: usize },
    /// The top item does not fit into the caller's buffer.
    DestinationTooSmall { required: usize, available: usize },
}

pub type Result<T> = core::result::Result<T, StackError>;

impl Display for StackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            StackError::Full => write!(f, "Stack is full"),
            StackError::Empty => write!(f, "Stack is empty"),
            StackError::OutOfMemory { requested } => {
                write!(f, "Out of memory while copying {} bytes", requested)
            }
            StackError::DestinationTooSmall {
                required,
                available,
            } => write!(
                f,
                "Destination too small: item is {} bytes, buffer holds {}",
                required, available
            ),
        }
    }
}

impl Debug for StackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(self, f)
    }
}

impl core::error::Error for StackError {}
