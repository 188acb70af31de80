pub mod media;
pub mod playlist;

pub use media::{category, Classification, MediaEntry};
pub use playlist::{
    AddPlaylistRequest, AddPlaylistResponse, CategoriesResponse, CategoryView, EntriesResponse,
    PlaylistRecord, PlaylistSummary, PlaylistsResponse, SearchQuery, StorageInfo, SubcategoryView,
};
