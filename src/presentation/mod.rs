mod cars;
mod chrome;
mod confirm;
mod form;
mod layout;
mod view;

pub use cars::{
    CarRenderer, CarTable, CardGrid, EMPTY_LISTING, LOADING_LISTING, render_listing, renderer_for,
};
pub use confirm::{CONFIRM_BODY, CONFIRM_TITLE};
pub use view::{PopupRender, UiContext, draw};
