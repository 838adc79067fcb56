//! Interaction domain model.

mod context;
mod entity;
mod event;
mod ids;
mod reply;

pub use context::InteractionContext;
pub use entity::{Channel, Member, PartialMember, Role, User};
pub use event::{
    CommandData, CommandOption, GatewayEvent, INTERACTION_CREATE, Interaction, InteractionKind,
    ResolvedData,
};
pub use ids::{ParseSnowflakeError, Snowflake};
pub use reply::{
    CHANNEL_MESSAGE_WITH_SOURCE, EPHEMERAL_FLAG, InteractionCallback, MessagePayload, ReplyKind,
    ReplyMessage, ReplyState,
};
