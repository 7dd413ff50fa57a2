//! Endpoint table for the Blockworld HTTP API
//!
//! Both the client and the reference server derive their paths from here, so
//! the two sides cannot drift apart.

use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode, CONTROLS};
use std::fmt;

/// Prefix under which the game server mounts every Blockworld endpoint.
pub const API_PREFIX: &str = "/apps/blockworld";

/// Characters a browser percent-encodes in a URL path. Non-ASCII bytes are
/// always encoded. `/`, `?` and `#` pass through.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn segment(id: &str) -> PercentEncode<'_> {
    utf8_percent_encode(id, PATH_ENCODE_SET)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for hyper::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => hyper::Method::GET,
            HttpMethod::Put => hyper::Method::PUT,
            HttpMethod::Post => hyper::Method::POST,
            HttpMethod::Delete => hyper::Method::DELETE,
        }
    }
}

/// One Blockworld endpoint with its path parameters filled in.
///
/// Identifiers are encoded the way a browser encodes a path: spaces, quotes,
/// angle brackets, braces, backticks, control and non-ASCII characters become
/// `%XX`. Reserved characters such as `/` are inserted verbatim, so an
/// identifier containing them yields a different path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    ListPlayers,
    CreatePlayer(&'a str),
    DeletePlayer(&'a str),
    MovePlayer(&'a str),
    PlaceBlock(&'a str),
    SetPlayerBlock(&'a str),
    GenerateWorld,
    ListBlocks,
    BlockColor(&'a str),
}

impl<'a> Route<'a> {
    pub fn method(&self) -> HttpMethod {
        match self {
            Route::ListPlayers | Route::ListBlocks | Route::BlockColor(_) => HttpMethod::Get,
            Route::CreatePlayer(_) | Route::SetPlayerBlock(_) | Route::GenerateWorld => {
                HttpMethod::Put
            }
            Route::MovePlayer(_) | Route::PlaceBlock(_) => HttpMethod::Post,
            Route::DeletePlayer(_) => HttpMethod::Delete,
        }
    }

    /// Absolute path of the endpoint, including [`API_PREFIX`].
    pub fn path(&self) -> String {
        match self {
            Route::ListPlayers => format!("{}/players", API_PREFIX),
            Route::CreatePlayer(id) | Route::DeletePlayer(id) => {
                format!("{}/players/{}", API_PREFIX, segment(id))
            }
            Route::MovePlayer(id) => format!("{}/players/{}/move", API_PREFIX, segment(id)),
            Route::PlaceBlock(id) => format!("{}/players/{}/place_block", API_PREFIX, segment(id)),
            Route::SetPlayerBlock(id) => format!("{}/players/{}/block", API_PREFIX, segment(id)),
            Route::GenerateWorld => format!("{}/world/generate", API_PREFIX),
            Route::ListBlocks => format!("{}/blocks", API_PREFIX),
            Route::BlockColor(name) => format!("{}/blocks/{}/color", API_PREFIX, segment(name)),
        }
    }

    /// Join the endpoint path onto `base_url`. A trailing `/` on the base is dropped.
    pub fn uri(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Route<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
