mod create_review;
mod delete_review;
mod get_review;
mod get_review_list;
mod update_review;
mod util;

use create_review::*;
use delete_review::*;
use get_review::*;
use get_review_list::*;
use update_review::*;
pub use util::*;
