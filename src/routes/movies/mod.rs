mod create_movie;
mod delete_movie;
mod get_movie;
mod get_movie_list;
mod movie_reviews;
mod update_movie;
mod util;

use create_movie::*;
use delete_movie::*;
use get_movie::*;
use get_movie_list::*;
use movie_reviews::*;
use update_movie::*;
pub use util::*;
