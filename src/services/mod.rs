pub mod ai_service;
pub mod chat_service;
pub mod contract_service;
pub mod geocode_service;
pub mod like_service;
pub mod matching_service;
pub mod notification_service;
pub mod profile_service;
pub mod rent_service;
pub mod scoring;
