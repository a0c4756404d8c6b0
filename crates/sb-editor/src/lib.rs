pub mod board;
pub mod gesture;
pub mod input;

pub use board::BoardController;
pub use gesture::{GestureController, GestureEvent};
pub use input::PointerInput;
