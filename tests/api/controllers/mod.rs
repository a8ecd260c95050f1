mod favorites;
mod library;
