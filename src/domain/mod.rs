mod artifact;
mod audio_format;
mod chat_turn;
mod message_role;
mod pipeline_stage;
mod question;
mod storage_path;
mod validation_error;

pub use artifact::{ArtifactId, AudioArtifact};
pub use audio_format::AudioFormat;
pub use chat_turn::ChatTurn;
pub use message_role::MessageRole;
pub use pipeline_stage::PipelineStage;
pub use question::Question;
pub use storage_path::StoragePath;
pub use validation_error::ValidationError;
