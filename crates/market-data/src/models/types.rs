/// Raw response body as returned by the transport and stored in the cache
pub type Payload = Vec<u8>;
