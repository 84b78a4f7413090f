use serde::{Deserialize, Serialize};

pub const BEST_QNA_PAGE_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyCategory {
    pub first_category: String,
    #[serde(default)]
    pub second_category: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoriesData {
    pub categories: Vec<StudyCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentsRequest {
    pub first_category: String,
    pub second_category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyContent {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentsData {
    #[serde(default)]
    pub contents: Vec<StudyContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyRequest {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BodyData {
    pub body: String,
}

/// Community-curated answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestQna {
    #[serde(default)]
    pub category: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestQnaData {
    #[serde(default)]
    pub best_qnas: Vec<BestQna>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub number: usize,
    pub total_pages: usize,
}

/// Filters by category (`None` keeps everything) and slices out one page.
/// Out-of-range pages are empty.
pub fn paginate_best_answers(items: &[BestQna], category: Option<&str>, page: usize) -> Page<BestQna> {
    let filtered: Vec<&BestQna> = items
        .iter()
        .filter(|item| category.is_none_or(|c| item.category == c))
        .collect();
    let total_pages = filtered.len().div_ceil(BEST_QNA_PAGE_SIZE);
    let number = page.max(1);
    let items = filtered
        .into_iter()
        .skip((number - 1).saturating_mul(BEST_QNA_PAGE_SIZE))
        .take(BEST_QNA_PAGE_SIZE)
        .cloned()
        .collect();

    Page { items, number, total_pages }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Company {
    Naver,
    Kakao,
    Line,
    Coupang,
    Baemin,
}

impl Company {
    /// Key expected by the reviews endpoint
    pub fn key(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QnaPair {
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewQuestion {
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub qna_pairs: Option<Vec<QnaPair>>,
}

impl ReviewQuestion {
    /// Question text without a leading `"3. "` style ordinal
    pub fn display_question(&self) -> &str {
        let trimmed = self.question.trim_start();
        let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
        match trimmed[digits..].strip_prefix('.') {
            Some(rest) if digits > 0 => rest.trim_start(),
            _ => trimmed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub questions: Vec<ReviewQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyReviews {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMap {
    #[serde(default)]
    pub cse_image: Vec<ImageRef>,
}

/// Reference material returned by keyword search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub pagemap: Option<PageMap>,
}

impl SearchResult {
    pub fn thumbnail(&self) -> Option<&str> {
        self.pagemap
            .as_ref()
            .and_then(|map| map.cse_image.first())
            .map(|image| image.src.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub data: Option<Vec<SearchResult>>,
}
