//! 结课证书 PDF 渲染
//!
//! A4 横版：橙色外框 + 虚线内框，标题、正文（学生/课程/日期）与署名区。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use printpdf::{BuiltinFont, Color, Line, LineDashPattern, Mm, PdfDocument, Point, Rgb};

use super::CourseProgressService;
use crate::errors::{Result, SchoolSystemError};
use crate::models::ErrorCode;
use crate::models::course_progress::entities::ProgressStatus;
use crate::services::{current_student, respond};

// A4 横版 (mm)
const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 15.0;
const INNER_INSET: f32 = 10.0;

const PLATFORM_NAME: &str = "PlataformaEDC";
const SIGNER_NAME: &str = "Lucas Piran";
const SIGNER_TITLE: &str = "Diretora de Ensino";

fn mm(value: f32) -> Mm {
    Mm(value.into())
}

fn orange() -> Color {
    Color::Rgb(Rgb::new(1.0, 0.478, 0.0, None))
}

fn gray() -> Color {
    Color::Rgb(Rgb::new(0.42, 0.45, 0.5, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// 内置 Helvetica 没有字宽表，用平均字宽近似做水平居中
fn approx_text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    text.chars().count() as f32 * font_size_pt * 0.5 * 0.3528
}

fn centered_x(text: &str, font_size_pt: f32) -> Mm {
    mm((PAGE_WIDTH - approx_text_width_mm(text, font_size_pt)) / 2.0)
}

fn rect_points(x: f32, y: f32, width: f32, height: f32) -> Vec<(Point, bool)> {
    vec![
        (Point::new(mm(x), mm(y)), false),
        (Point::new(mm(x + width), mm(y)), false),
        (Point::new(mm(x + width), mm(y + height)), false),
        (Point::new(mm(x), mm(y + height)), false),
    ]
}

/// 渲染证书，返回 PDF 字节
pub fn render_certificate(
    student_name: &str,
    course_title: &str,
    completed_at: chrono::NaiveDate,
) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "Course Completion Certificate",
        mm(PAGE_WIDTH),
        mm(PAGE_HEIGHT),
        "certificate",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| SchoolSystemError::pdf_render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| SchoolSystemError::pdf_render(e.to_string()))?;
    let oblique = doc
        .add_builtin_font(BuiltinFont::HelveticaOblique)
        .map_err(|e| SchoolSystemError::pdf_render(e.to_string()))?;

    // 橙色外框
    layer.set_outline_color(orange());
    layer.set_outline_thickness(8.0);
    layer.add_line(Line {
        points: rect_points(
            MARGIN,
            MARGIN,
            PAGE_WIDTH - 2.0 * MARGIN,
            PAGE_HEIGHT - 2.0 * MARGIN,
        ),
        is_closed: true,
    });

    // 虚线内框
    layer.set_outline_thickness(1.0);
    layer.set_line_dash_pattern(LineDashPattern {
        dash_1: Some(3),
        gap_1: Some(2),
        ..Default::default()
    });
    let inner = MARGIN + INNER_INSET;
    layer.add_line(Line {
        points: rect_points(
            inner,
            inner,
            PAGE_WIDTH - 2.0 * inner,
            PAGE_HEIGHT - 2.0 * inner,
        ),
        is_closed: true,
    });
    layer.set_line_dash_pattern(LineDashPattern::default());

    // 标题
    let title = "Certificado de Conclusão de Curso";
    layer.set_fill_color(black());
    layer.use_text(
        title,
        28.0,
        centered_x(title, 28.0),
        mm(PAGE_HEIGHT - 55.0),
        &bold,
    );

    // 标题下的橙色分隔线
    layer.set_outline_color(orange());
    layer.set_outline_thickness(2.0);
    layer.add_line(Line {
        points: vec![
            (Point::new(mm(70.0), mm(PAGE_HEIGHT - 62.0)), false),
            (Point::new(mm(PAGE_WIDTH - 70.0), mm(PAGE_HEIGHT - 62.0)), false),
        ],
        is_closed: false,
    });

    // 正文
    let completed = completed_at.format("%d/%m/%y").to_string();
    let body_lines = [
        format!("A {PLATFORM_NAME} certifica que {student_name},"),
        format!("concluiu com êxito o curso interno de {course_title},"),
        format!("realizado {completed}."),
    ];
    let mut body_y = PAGE_HEIGHT - 85.0;
    for line in &body_lines {
        layer.use_text(
            line.as_str(),
            14.0,
            centered_x(line, 14.0),
            mm(body_y),
            &regular,
        );
        body_y -= 9.0;
    }

    // 说明段
    let note_lines = [
        "Durante o programa, aluno(a) demonstrou empenho, participação ativa e",
        "capacidade de aplicar conhecimentos adquiridos no seu dia a dia profissional,",
        "contribuindo assim para o aprimoramento individual.",
    ];
    layer.set_fill_color(gray());
    let mut note_y = body_y - 10.0;
    for line in note_lines {
        layer.use_text(line, 10.0, centered_x(line, 10.0), mm(note_y), &oblique);
        note_y -= 6.0;
    }

    // 署名区
    layer.set_fill_color(black());
    let signature_y = MARGIN + INNER_INSET + 25.0;
    layer.use_text(
        SIGNER_NAME,
        20.0,
        centered_x(SIGNER_NAME, 20.0),
        mm(signature_y),
        &oblique,
    );

    let line_width = approx_text_width_mm(SIGNER_NAME, 20.0) + 15.0;
    layer.set_outline_color(black());
    layer.set_outline_thickness(0.7);
    layer.add_line(Line {
        points: vec![
            (
                Point::new(mm((PAGE_WIDTH - line_width) / 2.0), mm(signature_y - 3.0)),
                false,
            ),
            (
                Point::new(mm((PAGE_WIDTH + line_width) / 2.0), mm(signature_y - 3.0)),
                false,
            ),
        ],
        is_closed: false,
    });

    layer.use_text(
        SIGNER_NAME,
        11.0,
        centered_x(SIGNER_NAME, 11.0),
        mm(signature_y - 9.0),
        &regular,
    );
    layer.use_text(
        SIGNER_TITLE,
        10.0,
        centered_x(SIGNER_TITLE, 10.0),
        mm(signature_y - 15.0),
        &regular,
    );

    doc.save_to_bytes()
        .map_err(|e| SchoolSystemError::pdf_render(e.to_string()))
}

/// 下载文件名：标题转成安全的 ASCII 短串
fn safe_file_name(title: &str) -> String {
    title
        .replace(char::is_whitespace, "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(50)
        .collect()
}

pub async fn certificate(
    service: &CourseProgressService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match current_student(&storage, request).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let user = match storage.get_user_by_id(student.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::UserNotFound, "User not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to get user", e)),
    };

    let progress = match storage.find_progress(student.id, course_id).await {
        Ok(Some(progress)) => progress,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::ProgressNotFound,
                "Progress not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to load progress", e)),
    };

    if progress.status != ProgressStatus::Completed {
        return Ok(respond::bad_request(
            ErrorCode::CourseNotCompleted,
            "Course has not been completed",
        ));
    }

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::CourseNotFound,
                "Course not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get course", e)),
    };

    let completed_at = progress
        .completed_at
        .map(|t| t.date_naive())
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let pdf = match render_certificate(&user.name, &course.title, completed_at) {
        Ok(pdf) => pdf,
        Err(e) => return Ok(respond::internal("Failed to render certificate", e)),
    };

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!(
                "attachment; filename=certificate-{}.pdf",
                safe_file_name(&course.title)
            ),
        ))
        .body(pdf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_file_name() {
        assert_eq!(safe_file_name("Robotics Basics"), "Robotics-Basics");
        assert_eq!(safe_file_name("C++ & Rust!"), "C-Rust");
    }

    #[test]
    fn test_centered_text_stays_on_page() {
        let narrow = approx_text_width_mm("ok", 12.0);
        let wide = approx_text_width_mm("a much longer line of certificate text", 12.0);
        assert!(narrow < wide);
        assert!(wide < PAGE_WIDTH);
    }

    #[test]
    fn test_render_certificate_produces_pdf() {
        let pdf = render_certificate(
            "Maria Silva",
            "Robotics Basics",
            chrono::NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        )
        .unwrap();
        // PDF 头部魔术字节
        assert!(pdf.starts_with(b"%PDF"));
        assert!(pdf.len() > 500);
    }
}
