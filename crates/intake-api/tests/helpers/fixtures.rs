use axum_test::multipart::{MultipartForm, Part};
use rust_xlsxwriter::Workbook;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Workbook whose first sheet is a header row plus `data_rows` rows of
/// `(name, qty)`.
pub fn create_test_xlsx(data_rows: u32) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "name").unwrap();
    sheet.write_string(0, 1, "qty").unwrap();
    for i in 1..=data_rows {
        sheet.write_string(i, 0, format!("item{}", i)).unwrap();
        sheet.write_number(i, 1, i as f64).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

/// JPEG-looking bytes of exactly `len` bytes. Content is never inspected.
pub fn create_test_jpeg(len: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.resize(len.saturating_sub(2), 0x5A);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data.truncate(len);
    data
}

/// Form with a single `file` part.
pub fn file_form(data: Vec<u8>, filename: &str, mime: &str) -> MultipartForm {
    MultipartForm::new().add_part("file", Part::bytes(data).file_name(filename).mime_type(mime))
}
