mod create_director;
mod delete_director;
mod get_director;
mod get_director_list;
mod update_director;
mod util;

use create_director::*;
use delete_director::*;
use get_director::*;
use get_director_list::*;
use update_director::*;
pub use util::*;
