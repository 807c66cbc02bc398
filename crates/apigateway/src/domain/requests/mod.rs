mod internship;
mod revalidate;

pub use self::internship::{FindAllInternship, UpdateInternshipStatusRequest};
pub use self::revalidate::{RevalidateKind, RevalidateRequest};
