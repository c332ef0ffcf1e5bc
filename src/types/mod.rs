mod time;
pub use self::time::Time;

mod data;
pub use self::data::ResponseData;
