pub mod cache_entry;
pub mod generation_request;
pub mod generation_result;
pub use cache_entry::CacheEntry;
pub use generation_request::{Attachment, GenerationRequest, Level, Mode};
pub use generation_result::{GenerationResult, Lesson, Quiz, QuizQuestion};
