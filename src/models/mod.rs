pub mod booking;
pub mod movie;
pub mod seat;
pub mod user;

pub use booking::Booking;
pub use movie::Movie;
pub use seat::Seat;
pub use user::User;
