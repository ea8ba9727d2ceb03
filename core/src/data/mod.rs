pub mod scene;
pub mod tour_md;
