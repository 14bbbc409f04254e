//! Overlay dialog state machine.
//!
//! Closed is the only resting state: while closed the overlay mount is an
//! empty container, never hidden markup. Open renders the dialog content
//! inside a backdrop; a click closes it only when the backdrop itself is
//! the target, so clicks inside the dialog never dismiss it.

use tracing::debug;

use crate::node::{Node, NodeKind};

pub const OVERLAY_ROOT_ID: &str = "overlay-root";
pub const BACKDROP_ID: &str = "backdrop";
pub const DIALOG_ID: &str = "dialog";

#[derive(Debug, Default)]
pub struct Modal {
    open: bool,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        if !self.open {
            debug!(component = "modal", "Opening dialog");
            self.open = true;
        }
    }

    pub fn close(&mut self) {
        if self.open {
            debug!(component = "modal", "Closing dialog");
            self.open = false;
        }
    }

    /// Escape closes an open dialog. Returns whether the state changed.
    pub fn on_escape(&mut self) -> bool {
        if self.open {
            self.close();
            true
        } else {
            false
        }
    }

    /// A click somewhere in the overlay. Closes only when the backdrop
    /// itself was the target. Returns whether the state changed.
    pub fn on_overlay_click(&mut self, target_id: &str) -> bool {
        if self.open && target_id == BACKDROP_ID {
            self.close();
            true
        } else {
            false
        }
    }

    /// The overlay mount: `Backdrop[Dialog[content]]` while open, an empty
    /// container otherwise.
    pub fn render(&self, content: Option<Node>) -> Node {
        let root = Node::new(NodeKind::Container).with_id(OVERLAY_ROOT_ID);
        match (self.open, content) {
            (true, Some(content)) => root.child(
                Node::new(NodeKind::Backdrop).with_id(BACKDROP_ID).child(
                    Node::new(NodeKind::Dialog)
                        .with_id(DIALOG_ID)
                        .child(content),
                ),
            ),
            _ => root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> Node {
        Node::new(NodeKind::Paragraph).with_text("dialog body")
    }

    #[test]
    fn closed_overlay_is_empty() {
        let modal = Modal::new();
        let overlay = modal.render(Some(content()));
        assert!(overlay.children.is_empty());
    }

    #[test]
    fn open_overlay_nests_content_inside_backdrop_and_dialog() {
        let mut modal = Modal::new();
        modal.open();
        let overlay = modal.render(Some(content()));

        let backdrop = overlay.find(BACKDROP_ID).unwrap();
        assert_eq!(backdrop.kind, NodeKind::Backdrop);
        let dialog = overlay.find(DIALOG_ID).unwrap();
        assert_eq!(dialog.kind, NodeKind::Dialog);
        assert!(dialog.contains_text("dialog body"));
    }

    #[test]
    fn escape_closes_only_an_open_dialog() {
        let mut modal = Modal::new();
        assert!(!modal.on_escape());

        modal.open();
        assert!(modal.on_escape());
        assert!(!modal.is_open());
    }

    #[test]
    fn backdrop_click_closes_only_when_the_backdrop_is_the_target() {
        let mut modal = Modal::new();
        modal.open();

        assert!(!modal.on_overlay_click(DIALOG_ID));
        assert!(modal.is_open());
        assert!(!modal.on_overlay_click("title-input"));
        assert!(modal.is_open());

        assert!(modal.on_overlay_click(BACKDROP_ID));
        assert!(!modal.is_open());
    }

    #[test]
    fn reopening_renders_again_after_a_close() {
        let mut modal = Modal::new();
        modal.open();
        modal.close();
        assert!(modal.render(Some(content())).children.is_empty());

        modal.open();
        assert!(!modal.render(Some(content())).children.is_empty());
    }
}
