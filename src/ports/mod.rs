//! Ports: async trait seams between the application core and the
//! outside world. Adapters implement these; handlers depend only on
//! the traits.

mod chat_provider;
mod journal_store;
mod payment_gateway;
mod provider_error;
mod speech_synthesizer;
mod subscription_store;
mod transaction_log;
mod video_avatar;
mod voice_agent;

pub use chat_provider::{ChatMessage, ChatProvider, ChatRole};
pub use journal_store::JournalStore;
pub use payment_gateway::{
    CreateOrderRequest, CreateSubscriptionRequest, GatewayError, GatewayInvoice, GatewayOrder,
    GatewayOrderDetails, GatewaySubscription, PaymentGateway,
};
pub use provider_error::ProviderError;
pub use speech_synthesizer::{SpeechSynthesizer, SynthesizedAudio};
pub use subscription_store::SubscriptionStore;
pub use transaction_log::TransactionLog;
pub use video_avatar::{VideoAvatarService, VideoSession};
pub use voice_agent::{VoiceAgent, VoiceCallSession};
