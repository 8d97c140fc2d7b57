pub const MAX_PLACE_TYPE_LENGTH: usize = 64;
