#[path = "geometry/layers.rs"]
mod layers;
#[path = "geometry/printability.rs"]
mod printability;
#[path = "geometry/profile.rs"]
mod profile;
#[path = "geometry/scanline.rs"]
mod scanline;
