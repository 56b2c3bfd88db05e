//! Slot value representation
//!
//! This module defines [`SlotValue`], the symbolic contents of a stack slot or
//! argument. Values are typed the moment they are entered:
//!
//! - [`SlotValue::Literal`]: a number or free text (`5`, `x`, `"hello"`)
//! - [`SlotValue::Register`]: a register name such as `%eax`
//! - [`SlotValue::SavedBasePointer`]: the `%ebp` sentinel, which saves and
//!   restores the base pointer when pushed and popped
//!
//! Parsing and display are inverse on the sentinel, so `"%ebp"` is the only
//! text that ever produces [`SlotValue::SavedBasePointer`].

use std::fmt;

/// Text that marks a slot as holding a saved base pointer
pub const SAVED_BASE_POINTER: &str = "%ebp";

/// Literal slot contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Text(String),
}

/// Symbolic value held by a slot or argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValue {
    Literal(Literal),
    Register(String), // Name without the leading '%'
    SavedBasePointer,
}

impl SlotValue {
    /// Type a value typed into the form
    pub fn parse(text: &str) -> Self {
        if text == SAVED_BASE_POINTER {
            return SlotValue::SavedBasePointer;
        }

        if let Some(name) = text.strip_prefix('%') {
            if !name.is_empty() {
                return SlotValue::Register(name.to_string());
            }
        }

        // Only canonical integers become numbers so the typed text survives
        match text.parse::<i64>() {
            Ok(n) if n.to_string() == text => SlotValue::Literal(Literal::Int(n)),
            _ => SlotValue::Literal(Literal::Text(text.to_string())),
        }
    }

    /// Convenience constructor for integer literals
    pub fn int(n: i64) -> Self {
        SlotValue::Literal(Literal::Int(n))
    }

    /// Convenience constructor for register values (`name` without `%`)
    pub fn register(name: impl Into<String>) -> Self {
        SlotValue::Register(name.into())
    }

    /// Check if this is the saved base pointer sentinel
    pub fn is_saved_base_pointer(&self) -> bool {
        matches!(self, SlotValue::SavedBasePointer)
    }
}

impl From<&str> for SlotValue {
    fn from(text: &str) -> Self {
        SlotValue::parse(text)
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Literal(Literal::Int(n)) => write!(f, "{}", n),
            SlotValue::Literal(Literal::Text(text)) => write!(f, "{}", text),
            SlotValue::Register(name) => write!(f, "%{}", name),
            SlotValue::SavedBasePointer => write!(f, "{}", SAVED_BASE_POINTER),
        }
    }
}
