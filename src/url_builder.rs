use url::Url;

/// Results per search page; `start` advances by this much.
pub const PAGE_SIZE: u32 = 10;

pub fn offset_for_page(page: u32) -> u32 {
    page * PAGE_SIZE
}

/// `<site>/jobs?q=<keyword>&l=<location>&start=<start>`, form-encoded
/// (spaces become `+`).
pub fn build_search_url(site: &Url, keyword: &str, location: &str, start: u32) -> Url {
    let mut url = site.clone();
    let path = format!("{}/jobs", site.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .append_pair("q", keyword)
        .append_pair("l", location)
        .append_pair("start", &start.to_string());
    url
}
