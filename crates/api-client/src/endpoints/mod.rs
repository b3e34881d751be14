//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a group of SafeSus API routes.
//!
//! | Module | Routes | Cached |
//! |--------|--------|--------|
//! | `cities` | `GET /cities`, `GET /city/{slug}`, `POST`/`DELETE /save` | reads only |
//! | `live` | `GET /live/nearby`, `GET /nearby` | no |
//! | `tips` | `GET /recent-tips`, `GET /featured-tips`, `GET /search-tips`, `POST /submit-tip` | recent and featured |
//! | `pins` | `POST /submit-pin` | no |
//! | `notifications` | `GET /notifications`, `PATCH /notifications/{id}`, `POST /notifications/mark-all-read` | no |
//! | `waitlist` | `GET /waitlist-count` | yes |

pub mod cities;
pub mod live;
pub mod notifications;
pub mod pins;
pub mod tips;
pub mod waitlist;

pub use cities::CitiesApi;
pub use live::{Include, LiveApi, NearbyContent, NearbyOptions};
pub use notifications::NotificationsApi;
pub use pins::PinsApi;
pub use tips::TipsApi;
pub use waitlist::WaitlistApi;
