//! Export coordination
//!
//! The coordinator is the single entry point behind the download buttons:
//! it checks preconditions, runs the right renderer, names the file and
//! hands it to the delivery sink. Every outcome is reported; nothing is
//! retried.

use crate::config::ExportConfig;
use crate::delivery::{DeliveredFile, Delivery};
use crate::docx::DocumentModelBuilder;
use crate::error::{ExportError, ExportFailure, Result};
use crate::format::{ExportFormat, Payload};
use crate::raster::{RasterExporter, RenderSurface};
use crate::text::TextFormatter;
use resume_model::ResumeDocument;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Result of one export request
pub type ExportOutcome = std::result::Result<DeliveredFile, ExportFailure>;

/// Counts an in-flight export for as long as it is alive
struct GeneratingGuard<'a>(&'a AtomicUsize);

impl<'a> GeneratingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for GeneratingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Dispatches export requests to the renderers
pub struct ExportCoordinator<D: Delivery> {
    config: ExportConfig,
    delivery: D,
    text: TextFormatter,
    docx: DocumentModelBuilder,
    raster: RasterExporter,
    generating: AtomicUsize,
    /// One export at a time per coordinator, from render through delivery
    serial: tokio::sync::Mutex<()>,
}

impl<D: Delivery> ExportCoordinator<D> {
    pub fn new(config: ExportConfig, delivery: D) -> Self {
        Self {
            text: TextFormatter::new(&config.text),
            docx: DocumentModelBuilder::new(config.docx.clone()),
            raster: RasterExporter::new(config.raster.clone(), config.pdf.clone()),
            config,
            delivery,
            generating: AtomicUsize::new(0),
            serial: tokio::sync::Mutex::new(()),
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn delivery(&self) -> &D {
        &self.delivery
    }

    /// Whether an export is queued or running
    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::SeqCst) > 0
    }

    /// Render `doc` as `format` and deliver it.
    ///
    /// PDF needs a ready `surface`; without one the request fails before any
    /// capture starts. The surface is ignored for the other formats. A
    /// concurrent export waits until this one has been delivered.
    pub async fn export<S: RenderSurface>(
        &self,
        format: ExportFormat,
        doc: &ResumeDocument,
        surface: Option<&S>,
    ) -> ExportOutcome {
        let _generating = GeneratingGuard::enter(&self.generating);

        let result = async {
            let surface = ready_surface(format, surface)?;
            let _serial = self.serial.lock().await;
            let payload = self.render_locked(format, doc, surface).await?;
            let file_name = self.config.naming.file_name(&doc.name, format);
            self.delivery.deliver(&file_name, &payload).await
        }
        .await;

        match result {
            Ok(file) => {
                tracing::info!(
                    format = %format,
                    file_name = %file.file_name,
                    bytes = file.bytes,
                    "resume exported"
                );
                Ok(file)
            }
            Err(e) => {
                tracing::error!(format = %format, error = %e, "resume export failed");
                Err(ExportFailure::new(format, e))
            }
        }
    }

    /// Like [`export`](Self::export), with the format given as a token such
    /// as `"pdf"` or `".docx"`
    pub async fn export_token<S: RenderSurface>(
        &self,
        token: &str,
        doc: &ResumeDocument,
        surface: Option<&S>,
    ) -> ExportOutcome {
        match token.parse::<ExportFormat>() {
            Ok(format) => self.export(format, doc, surface).await,
            Err(e) => {
                tracing::error!(token, error = %e, "resume export failed");
                Err(ExportFailure::without_format(e))
            }
        }
    }

    /// Render without delivering
    pub async fn render<S: RenderSurface>(
        &self,
        format: ExportFormat,
        doc: &ResumeDocument,
        surface: Option<&S>,
    ) -> Result<Payload> {
        let surface = ready_surface(format, surface)?;
        let _serial = self.serial.lock().await;
        self.render_locked(format, doc, surface).await
    }

    /// Caller holds `serial`
    async fn render_locked<S: RenderSurface>(
        &self,
        format: ExportFormat,
        doc: &ResumeDocument,
        surface: Option<&S>,
    ) -> Result<Payload> {
        tracing::debug!(format = %format, "rendering resume");

        let data = match (format, surface) {
            (ExportFormat::Txt, _) => self.text.format(doc).into_bytes(),
            (ExportFormat::Docx, _) => self.docx.render(doc).await?,
            (ExportFormat::Pdf, Some(surface)) => {
                self.raster.capture(surface, Some(doc.name.as_str())).await?
            }
            (ExportFormat::Pdf, None) => return Err(ExportError::MissingSurface),
        };

        Ok(Payload::new(format, data))
    }
}

/// Drop a surface that isn't ready, failing if `format` needs one
fn ready_surface<S: RenderSurface>(format: ExportFormat, surface: Option<&S>) -> Result<Option<&S>> {
    match surface {
        Some(s) if s.is_ready() => Ok(Some(s)),
        _ if format.requires_surface() => Err(ExportError::MissingSurface),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::{DirectoryDelivery, MemoryDelivery};
    use crate::naming::FilenamePolicy;
    use crate::raster::{BitmapSurface, CaptureError, CaptureOptions};
    use image::{Rgba, RgbaImage};
    use resume_model::Experience;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Surface that records how often it was captured
    struct CountingSurface {
        ready: bool,
        delay: Duration,
        snapshots: AtomicUsize,
    }

    impl CountingSurface {
        fn ready() -> Self {
            Self {
                ready: true,
                delay: Duration::ZERO,
                snapshots: AtomicUsize::new(0),
            }
        }

        fn not_ready() -> Self {
            Self {
                ready: false,
                ..Self::ready()
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::ready()
            }
        }

        fn count(&self) -> usize {
            self.snapshots.load(Ordering::SeqCst)
        }
    }

    impl RenderSurface for CountingSurface {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn natural_size(&self) -> (u32, u32) {
            (20, 30)
        }

        async fn snapshot(&self, _options: &CaptureOptions) -> std::result::Result<RgbaImage, CaptureError> {
            self.snapshots.fetch_add(1, Ordering::SeqCst);
            if !self.ready {
                return Err(CaptureError::NotReady);
            }
            tokio::time::sleep(self.delay).await;
            Ok(RgbaImage::from_pixel(40, 60, Rgba([255, 255, 255, 255])))
        }
    }

    /// Delivery that takes a while and logs when each file starts and ends
    #[derive(Default)]
    struct SlowDelivery {
        log: std::sync::Mutex<Vec<String>>,
    }

    impl Delivery for SlowDelivery {
        async fn deliver(&self, file_name: &str, payload: &Payload) -> Result<DeliveredFile> {
            self.log.lock().unwrap().push(format!("start {}", file_name));
            tokio::time::sleep(Duration::from_millis(30)).await;
            self.log.lock().unwrap().push(format!("end {}", file_name));
            Ok(DeliveredFile {
                file_name: file_name.to_string(),
                format: payload.format,
                bytes: payload.len(),
                path: None,
            })
        }
    }

    fn doc() -> ResumeDocument {
        ResumeDocument {
            name: "Amelia Chen".into(),
            email: "amelia@example.com".into(),
            summary: "Backend engineer.".into(),
            skills: vec!["Rust".into(), "SQL".into()],
            experience: vec![Experience {
                title: "Engineer".into(),
                company: "Innovate Inc.".into(),
                duration: "2021 - Present".into(),
                responsibilities: "Led X\nBuilt Y".into(),
            }],
            ..Default::default()
        }
    }

    fn coordinator() -> ExportCoordinator<MemoryDelivery> {
        ExportCoordinator::new(ExportConfig::default(), MemoryDelivery::new())
    }

    #[tokio::test]
    async fn test_pdf_without_ready_surface_never_captures() {
        let coordinator = coordinator();
        let surface = CountingSurface::not_ready();

        let failure = coordinator
            .export(ExportFormat::Pdf, &doc(), Some(&surface))
            .await
            .unwrap_err();

        assert!(matches!(failure.error, ExportError::MissingSurface));
        assert_eq!(failure.format, Some(ExportFormat::Pdf));
        assert!(failure.to_string().starts_with("Sorry, there was an error generating the PDF file"));
        assert_eq!(surface.count(), 0);
        assert!(coordinator.delivery().is_empty());
        assert!(!coordinator.is_generating());
    }

    #[tokio::test]
    async fn test_pdf_without_surface() {
        let failure = coordinator()
            .export::<BitmapSurface>(ExportFormat::Pdf, &doc(), None)
            .await
            .unwrap_err();
        assert!(matches!(failure.error, ExportError::MissingSurface));
    }

    #[tokio::test]
    async fn test_txt_export() {
        let coordinator = coordinator();
        let file = coordinator
            .export::<BitmapSurface>(ExportFormat::Txt, &doc(), None)
            .await
            .unwrap();

        assert_eq!(file.file_name, "Amelia_Chen_Resume.txt");
        let (name, payload) = coordinator.delivery().last().unwrap();
        assert_eq!(name, "Amelia_Chen_Resume.txt");
        assert_eq!(
            String::from_utf8(payload.data).unwrap(),
            TextFormatter::new(&Default::default()).format(&doc())
        );
    }

    #[tokio::test]
    async fn test_docx_export() {
        let coordinator = coordinator();
        let file = coordinator
            .export::<BitmapSurface>(ExportFormat::Docx, &doc(), None)
            .await
            .unwrap();

        assert_eq!(file.file_name, "Amelia_Chen_Resume.docx");
        let (_, payload) = coordinator.delivery().last().unwrap();
        assert!(payload.data.starts_with(b"PK"));
        assert_eq!(payload.mime_type(), ExportFormat::Docx.mime_type());
    }

    #[tokio::test]
    async fn test_pdf_export() {
        let coordinator = coordinator();
        let surface = CountingSurface::ready();
        let file = coordinator
            .export(ExportFormat::Pdf, &doc(), Some(&surface))
            .await
            .unwrap();

        assert_eq!(file.file_name, "Amelia_Chen_Resume.pdf");
        assert_eq!(surface.count(), 1);
        let (_, payload) = coordinator.delivery().last().unwrap();
        assert!(payload.data.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_generating_flag_spans_the_export() {
        let coordinator = coordinator();
        let surface = CountingSurface::slow(Duration::from_millis(200));
        let doc = doc();

        let (outcome, during) = tokio::join!(
            coordinator.export(ExportFormat::Pdf, &doc, Some(&surface)),
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                coordinator.is_generating()
            }
        );

        assert!(outcome.is_ok());
        assert!(during);
        assert!(!coordinator.is_generating());
    }

    #[tokio::test]
    async fn test_timeout_clears_flag() {
        let config = ExportConfig::default().with_timeout(Duration::from_millis(20));
        let coordinator = ExportCoordinator::new(config, MemoryDelivery::new());
        let surface = CountingSurface::slow(Duration::from_secs(5));

        let failure = coordinator
            .export(ExportFormat::Pdf, &doc(), Some(&surface))
            .await
            .unwrap_err();

        assert!(matches!(failure.error, ExportError::Timeout(_)));
        assert!(!coordinator.is_generating());
    }

    #[tokio::test]
    async fn test_export_token() {
        let coordinator = coordinator();

        let file = coordinator
            .export_token::<BitmapSurface>(" .TXT ", &doc(), None)
            .await
            .unwrap();
        assert_eq!(file.format, ExportFormat::Txt);

        let failure = coordinator
            .export_token::<BitmapSurface>("odt", &doc(), None)
            .await
            .unwrap_err();
        assert_eq!(failure.format, None);
        assert!(matches!(failure.error, ExportError::UnsupportedFormat(ref t) if t == "odt"));
    }

    #[tokio::test]
    async fn test_concurrent_exports_all_complete() {
        let coordinator = coordinator();
        let doc = doc();
        let (a, b) = tokio::join!(
            coordinator.export::<BitmapSurface>(ExportFormat::Txt, &doc, None),
            coordinator.export::<BitmapSurface>(ExportFormat::Docx, &doc, None)
        );
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(coordinator.delivery().len(), 2);
        assert!(!coordinator.is_generating());
    }

    #[tokio::test]
    async fn test_concurrent_exports_deliver_one_at_a_time() {
        let coordinator = ExportCoordinator::new(ExportConfig::default(), SlowDelivery::default());
        let doc = doc();
        let (a, b) = tokio::join!(
            coordinator.export::<BitmapSurface>(ExportFormat::Txt, &doc, None),
            coordinator.export::<BitmapSurface>(ExportFormat::Docx, &doc, None)
        );
        assert!(a.is_ok() && b.is_ok());

        let log = coordinator.delivery().log.lock().unwrap().clone();
        assert_eq!(log.len(), 4);
        for pair in log.chunks(2) {
            let started = pair[0].strip_prefix("start ").unwrap();
            let ended = pair[1].strip_prefix("end ").unwrap();
            assert_eq!(started, ended, "deliveries interleaved: {:?}", log);
        }
    }

    #[tokio::test]
    async fn test_generic_naming_and_blank_name() {
        let config = ExportConfig::default().with_naming(FilenamePolicy::Generic);
        let file = ExportCoordinator::new(config, MemoryDelivery::new())
            .export::<BitmapSurface>(ExportFormat::Txt, &doc(), None)
            .await
            .unwrap();
        assert_eq!(file.file_name, "resume.txt");

        let mut blank = doc();
        blank.name = "   ".into();
        let file = coordinator()
            .export::<BitmapSurface>(ExportFormat::Txt, &blank, None)
            .await
            .unwrap();
        assert_eq!(file.file_name, "resume.txt");
    }

    #[tokio::test]
    async fn test_directory_delivery() {
        let dir = TempDir::new().unwrap();
        let coordinator = ExportCoordinator::new(ExportConfig::default(), DirectoryDelivery::new(dir.path()));

        let file = coordinator
            .export::<BitmapSurface>(ExportFormat::Txt, &doc(), None)
            .await
            .unwrap();

        let path = dir.path().join("Amelia_Chen_Resume.txt");
        assert_eq!(file.path.as_deref(), Some(path.as_path()));
        assert!(std::fs::read_to_string(path).unwrap().starts_with("Amelia Chen\n"));
    }
}
