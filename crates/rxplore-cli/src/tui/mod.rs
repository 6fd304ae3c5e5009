//! Minimal ratatui application runtime.
//!
//! The runtime blocks on terminal input and redraws only after events the
//! application reports as visible; there is no background tick. Applications are either a bare [`App`] or a
//! [`ScreenStack`] of [`Screen`]s sharing one context value.

pub(crate) use self::{
    app::App,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod runtime;
mod screen;
