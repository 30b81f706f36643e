use crate::error::Result;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// The five discrete pointer events a block can react to.
///
/// Codes follow the X11/evdev convention: 1 = left, 2 = middle, 3 = right,
/// 4 = wheel up, 5 = wheel down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::Left,
        Button::Middle,
        Button::Right,
        Button::ScrollUp,
        Button::ScrollDown,
    ];

    /// Map a hardware button code; anything outside `1..=5` is ignored.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Left),
            2 => Some(Self::Middle),
            3 => Some(Self::Right),
            4 => Some(Self::ScrollUp),
            5 => Some(Self::ScrollDown),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 3,
            Self::ScrollUp => 4,
            Self::ScrollDown => 5,
        }
    }

    fn slot(self) -> usize {
        usize::from(self.code() - 1)
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "button{}", self.code())
    }
}

/// A zero-argument fallible operation bound to a button on a block.
pub trait Action: Send + Sync {
    fn invoke(&self) -> BoxFuture<'static, Result<()>>;
}

impl<F, Fut> Action for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    fn invoke(&self) -> BoxFuture<'static, Result<()>> {
        Box::pin(self())
    }
}

/// Per-block dispatch table, one optional action per [`Button`].
#[derive(Default, Clone)]
pub struct ActionTable {
    slots: [Option<Arc<dyn Action>>; 5],
}

impl ActionTable {
    pub fn set(&mut self, button: Button, action: impl Action + 'static) {
        self.slots[button.slot()] = Some(Arc::new(action));
    }

    pub fn get(&self, button: Button) -> Option<Arc<dyn Action>> {
        self.slots[button.slot()].clone()
    }
}

impl fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound: Vec<Button> = Button::ALL
            .into_iter()
            .filter(|b| self.slots[b.slot()].is_some())
            .collect();
        f.debug_struct("ActionTable").field("bound", &bound).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BarError;

    #[test]
    fn codes_round_trip_and_reject_unknown() {
        for b in Button::ALL {
            assert_eq!(Button::from_code(b.code()), Some(b));
        }
        assert_eq!(Button::from_code(0), None);
        assert_eq!(Button::from_code(8), None);
    }

    #[test]
    fn display_uses_event_tag() {
        assert_eq!(Button::ScrollDown.to_string(), "button5");
    }

    #[test]
    fn table_lookup_by_button() {
        let mut table = ActionTable::default();
        assert!(table.get(Button::Right).is_none());
        table.set(Button::Right, || async { Ok::<(), BarError>(()) });
        assert!(table.get(Button::Right).is_some());
        assert!(table.get(Button::Left).is_none());
    }
}
