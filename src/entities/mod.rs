pub mod artwork;
pub mod avail;
pub mod cast_member;
pub mod caption;
pub mod crew_member;
pub mod document;
pub mod festival;
pub mod license;
pub mod title;
pub mod title_profile;
pub mod update;
