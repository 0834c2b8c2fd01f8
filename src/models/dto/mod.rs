pub mod request;

pub use request::GenerateRequestDto;
