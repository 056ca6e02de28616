/// Conversation entity module
pub mod conversation;
/// Conversation participant entity module
pub mod conversation_participant;
/// Message entity module
pub mod message;

pub use conversation::Entity as Conversation;
pub use conversation_participant::Entity as ConversationParticipant;
pub use message::Entity as Message;
