//! Image asset names
//!
//! Every monster is assigned one of a fixed set of bundled images when it is
//! inserted. The name follows the `monster_<n>` convention with `n` in `1..=30`.

use rand::Rng;

/// Number of bundled monster images
pub const IMAGE_COUNT: u32 = 30;

/// Prefix shared by all image asset names
pub const IMAGE_PREFIX: &str = "monster_";

/// Pick an image name uniformly at random
pub fn random_image_name() -> String {
    random_image_name_with(&mut rand::thread_rng())
}

/// Pick an image name using the given random source
pub fn random_image_name_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}{}", IMAGE_PREFIX, rng.gen_range(1..=IMAGE_COUNT))
}

/// Extract the image number from an asset name
///
/// Returns `None` if the name does not follow the convention or the number
/// is out of range.
pub fn image_index(name: &str) -> Option<u32> {
    let n: u32 = name.strip_prefix(IMAGE_PREFIX)?.parse().ok()?;
    (1..=IMAGE_COUNT).contains(&n).then_some(n)
}
