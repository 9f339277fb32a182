//! Page Identifiers
//!
//! One constant per administrable screen. The same strings are stored in the
//! rights table, and matching is exact, so pages must reference these
//! constants rather than literals.

// === 内容管理 ===
pub const ABOUT_SECTION: &str = "About Section";
pub const HERO_SECTION: &str = "Hero Section";
pub const TESTIMONIALS: &str = "Testimonials";
pub const ACHIEVEMENTS: &str = "Achievements";
pub const BLOG_LIST: &str = "Blog List";

// === 院校与名录 ===
pub const COLLEGE_LIST: &str = "College List";
pub const ADD_UNIVERSITY: &str = "Add University";
pub const ADD_PROFESSION: &str = "Add Profession";
pub const ADD_SOURCE: &str = "Add Source";
pub const ADD_TARGET: &str = "Add Target";

// === 成员与咨询 ===
pub const ENQUIRY_LIST: &str = "Enquiry List";
pub const AGS_DELEGATE: &str = "AGS Delegate";

// === 用户管理 ===
pub const USER_MANAGEMENT: &str = "User Management";
pub const ROLE_MANAGEMENT: &str = "Role Management";

/// Every page identifier, in menu order
pub const ALL_PAGES: &[&str] = &[
    ABOUT_SECTION,
    HERO_SECTION,
    TESTIMONIALS,
    ACHIEVEMENTS,
    BLOG_LIST,
    COLLEGE_LIST,
    ADD_UNIVERSITY,
    ADD_PROFESSION,
    ADD_SOURCE,
    ADD_TARGET,
    ENQUIRY_LIST,
    AGS_DELEGATE,
    USER_MANAGEMENT,
    ROLE_MANAGEMENT,
];

/// Whether `page` is one of the known identifiers
pub fn is_known_page(page: &str) -> bool {
    ALL_PAGES.contains(&page)
}
