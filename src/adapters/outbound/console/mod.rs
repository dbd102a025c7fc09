/// Console adapters for local output
mod stdout_presenter;

pub use stdout_presenter::StdoutPresenter;
