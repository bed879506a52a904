// File: crates/chart-core/src/tooltip.rs
// Summary: Tooltip presenter contract and the content the engine hands to it.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

pub use crate::types::TooltipPosition;

/// One row of the tooltip: a series value at the hovered sample.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TooltipItem {
    pub color: String,
    pub name: String,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TooltipContent {
    /// Formatted date of the hovered sample.
    pub title: String,
    pub items: Vec<TooltipItem>,
}

/// Renders tooltip content next to the pointer. Implemented by the host.
pub trait TooltipPresenter {
    fn show(&mut self, position: TooltipPosition, content: &TooltipContent);
    fn hide(&mut self);
}

impl<T: TooltipPresenter + ?Sized> TooltipPresenter for Rc<RefCell<T>> {
    fn show(&mut self, position: TooltipPosition, content: &TooltipContent) {
        self.borrow_mut().show(position, content)
    }
    fn hide(&mut self) { self.borrow_mut().hide() }
}

/// Presenter for hosts without a tooltip widget.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTooltip;

impl TooltipPresenter for NoTooltip {
    fn show(&mut self, _position: TooltipPosition, _content: &TooltipContent) {}
    fn hide(&mut self) {}
}
