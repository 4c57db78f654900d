pub mod candidate;
pub mod chat_message;
pub mod complaint;
pub mod forum;
pub mod liked_profile;
pub mod notification;
pub mod review;
pub mod roommate_profile;

pub use candidate::{CandidateKey, CandidateMatch};
pub use chat_message::ChatMessageRow;
pub use complaint::ComplaintRow;
pub use forum::{ForumPostRow, ForumReplyRow};
pub use liked_profile::LikedProfileRow;
pub use notification::NotificationRow;
pub use review::LandlordReviewRow;
pub use roommate_profile::{Role, RoleDetails, RoommateProfile, RoommateProfileRow};
