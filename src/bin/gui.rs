#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use duct_flow_toolbox::{
    app, config, flow,
    i18n::{self, field_label_key, keys},
    logging,
    measurement::{
        calculate, AxisCount, ConfigField, FlowResult, MeasurementConfig, MeasurementError,
        PressureReadings,
    },
    session::{self, MeasurementSession},
    ui_cli,
    units::ResultUnit,
};
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{fs, path::Path, path::PathBuf};

const LANGUAGE_CHOICES: [&str; 3] = ["auto", "ko", "en"];
const MAX_AXES: usize = 2;

/// Log-Chebyshev 덕트 유량 측정 도우미 (데스크톱)
#[derive(Debug, Parser)]
#[command(name = "duct_flow_toolbox", version)]
struct GuiArgs {
    /// 언어 코드 (auto/ko/en)
    #[arg(long, short = 'L')]
    lang: Option<String>,
    /// 설정 파일 경로
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), eframe::Error> {
    let args = GuiArgs::parse();
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE));
    let mut app_cfg = config::load_or_default_at(&config_path).unwrap_or_else(|e| {
        eprintln!("config error: {e}");
        config::Config::default()
    });
    if let Err(e) = logging::init(logging::parse_level(&app_cfg.log_level)) {
        eprintln!("logger error: {e}");
    }
    if let Some(lang) = args.lang {
        app_cfg.language = lang;
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([980.0, 680.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Duct Flow Toolbox",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                log::warn!("{e}");
            }
            Box::new(GuiApp::new(app_cfg, config_path))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시용 시스템 폰트를 찾아 적용한다. 찾지 못하면 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for name in ["malgun.ttf", "gulim.ttc", "batang.ttc"] {
            candidates.push(fonts.join(name));
        }
    }
    for path in [
        "assets/fonts/malgun.ttf",
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    ] {
        candidates.push(PathBuf::from(path));
    }

    for path in candidates.iter().filter(|p| p.exists()) {
        match fs::read(path) {
            Ok(bytes) => {
                apply_font_bytes(ctx, bytes, "korean_font");
                log::info!("using font {}", path.display());
                return Ok(());
            }
            Err(e) => log::warn!("failed to read font {}: {e}", path.display()),
        }
    }
    Err("Korean font not found; using default egui font.".into())
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    tr: i18n::Translator,
    lang_choice: String,
    measurement: MeasurementConfig,
    // 항목별 입력 버퍼와 검증 오류 (ConfigField::ALL 순서)
    field_inputs: [String; 6],
    field_errors: [Option<String>; 6],
    axes: AxisCount,
    // 축별/측정점별 차압 입력 버퍼
    reading_inputs: [Vec<String>; MAX_AXES],
    result: Option<FlowResult>,
    result_unit: ResultUnit,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, config_path: PathBuf) -> Self {
        let lang_code = i18n::resolve_language(&config.language, None);
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let lang_choice = config.language.clone();
        let result_unit = config.default_result_unit;
        let mut gui = Self {
            measurement: MeasurementConfig::default(),
            config,
            config_path,
            tr,
            lang_choice,
            field_inputs: Default::default(),
            field_errors: Default::default(),
            axes: AxisCount::One,
            reading_inputs: Default::default(),
            result: None,
            result_unit,
            status: None,
        };
        gui.reset_measurement();
        gui
    }

    fn reset_measurement(&mut self) {
        self.measurement = app::new_measurement(&self.config);
        self.sync_field_inputs();
        self.axes = AxisCount::One;
        self.reading_inputs = Default::default();
        self.result = None;
        self.status = None;
    }

    /// 측정 설정 값을 입력 버퍼에 다시 채운다.
    fn sync_field_inputs(&mut self) {
        for (idx, field) in ConfigField::ALL.into_iter().enumerate() {
            self.field_inputs[idx] = self
                .measurement
                .get(field)
                .map(|v| v.to_string())
                .unwrap_or_default();
            self.field_errors[idx] = None;
        }
    }

    /// 입력 버퍼 하나를 검증해 측정 설정에 반영한다. 잘못된 값은 미입력으로 취급한다.
    fn apply_field_input(&mut self, idx: usize, field: ConfigField) {
        let text = self.field_inputs[idx].trim().to_string();
        self.result = None;
        if text.is_empty() {
            self.measurement.clear(field);
            self.field_errors[idx] = None;
            return;
        }
        let outcome = match text.parse::<f64>() {
            Ok(value) => self
                .measurement
                .set(field, value)
                .map_err(|e| ui_cli::measurement_error_message(&self.tr, &e)),
            Err(_) => Err(self.tr.t(keys::ERROR_INVALID_NUMBER)),
        };
        if let Err(msg) = outcome {
            log::debug!("rejected {field} input {text:?}: {msg}");
            self.measurement.clear(field);
            self.field_errors[idx] = Some(msg);
        } else {
            self.field_errors[idx] = None;
        }
    }

    fn current_points(&self) -> Option<Vec<f64>> {
        let diameter = self.measurement.duct_diameter_mm?;
        let count = self.measurement.sample_count?;
        flow::compute_measurement_points(count.coefficients(), diameter).ok()
    }

    fn collect_readings(&self, point_count: usize) -> Result<PressureReadings, String> {
        let mut readings = PressureReadings::new();
        for (axis_idx, axis) in self.reading_inputs.iter().take(self.axes.count()).enumerate() {
            let mut values = Vec::with_capacity(point_count);
            for (idx, text) in axis.iter().take(point_count).enumerate() {
                let value = text.trim().parse::<i32>().map_err(|_| {
                    format!(
                        "{} ({} {}, #{})",
                        self.tr.t(keys::ERROR_INVALID_INTEGER),
                        self.tr.t(keys::GUI_AXES),
                        axis_idx + 1,
                        idx + 1
                    )
                })?;
                values.push(value);
            }
            readings
                .push_axis(values, point_count)
                .map_err(|e| ui_cli::measurement_error_message(&self.tr, &e))?;
        }
        Ok(readings)
    }

    fn try_calculate(&self) -> Result<FlowResult, String> {
        let describe = |e: MeasurementError| ui_cli::measurement_error_message(&self.tr, &e);
        let inputs = self.measurement.snapshot().map_err(describe)?;
        let points = inputs
            .measurement_points()
            .map_err(|e| ui_cli::flow_error_message(&self.tr, &e))?;
        let readings = self.collect_readings(points.len())?;
        calculate(&inputs, &readings).map_err(describe)
    }

    fn run_calculation(&mut self) {
        match self.try_calculate() {
            Ok(result) => {
                log::info!(
                    "calculated volume flow {} m3/s, mass flow {} kg/s",
                    result.volume_flow_m3_per_s,
                    result.mass_flow_kg_per_s
                );
                self.result = Some(result);
                self.status = None;
            }
            Err(msg) => {
                self.result = None;
                self.status = Some(format!("{}: {msg}", self.tr.t(keys::ERROR_PREFIX)));
            }
        }
    }

    fn open_session(&mut self) {
        let Some(path) = FileDialog::new().add_filter("TOML", &["toml"]).pick_file() else {
            return;
        };
        match session::load(&path) {
            Ok(mut loaded) => {
                let recalculated = loaded.recalculate().cloned();
                self.measurement = loaded.config.clone();
                self.sync_field_inputs();
                self.axes = if loaded.readings.axis_count() >= 2 {
                    AxisCount::Two
                } else {
                    AxisCount::One
                };
                self.reading_inputs = Default::default();
                for (slot, axis) in self.reading_inputs.iter_mut().zip(loaded.readings.axes()) {
                    *slot = axis.iter().map(|v| v.to_string()).collect();
                }
                match recalculated {
                    Ok(result) => {
                        self.result = Some(result);
                        self.status = Some(path.display().to_string());
                    }
                    Err(e) => {
                        self.result = None;
                        let msg = ui_cli::measurement_error_message(&self.tr, &e);
                        self.status = Some(format!("{}: {msg}", self.tr.t(keys::ERROR_PREFIX)));
                    }
                }
            }
            Err(e) => self.status = Some(format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX))),
        }
    }

    fn save_session(&mut self) {
        // 측정값이 다 채워지지 않았으면 설정만 저장한다.
        let readings = match self.current_points() {
            Some(points) => self.collect_readings(points.len()).unwrap_or_default(),
            None => PressureReadings::default(),
        };
        let Some(path) = FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("measurement.toml")
            .save_file()
        else {
            return;
        };
        let session = MeasurementSession {
            config: self.measurement.clone(),
            readings,
            result: self.result.clone(),
        };
        self.status = Some(match session::save(&path, &session) {
            Ok(()) => self
                .tr
                .tf(keys::SESSION_SAVED, &[("path", path.display().to_string())]),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn change_language(&mut self, choice: &str) {
        self.config.language = choice.to_string();
        let code = i18n::resolve_language(choice, None);
        self.tr = i18n::Translator::new_with_pack(&code, self.config.language_pack_dir.as_deref());
        if let Err(e) = self.config.save_to(&self.config_path) {
            log::warn!("failed to save configuration: {e}");
        }
    }

    fn ui_top_bar(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.horizontal(|ui| {
            ui.heading(tr.t(keys::GUI_APP_TITLE));
            ui.separator();
            if ui.button(tr.t(keys::GUI_NEW_SESSION)).clicked() {
                self.reset_measurement();
            }
            if ui.button(tr.t(keys::GUI_OPEN_SESSION)).clicked() {
                self.open_session();
            }
            if ui.button(tr.t(keys::GUI_SAVE_SESSION)).clicked() {
                self.save_session();
            }
            ui.separator();
            ui.label(tr.t(keys::GUI_LANGUAGE));
            let before = self.lang_choice.clone();
            egui::ComboBox::from_id_source("language")
                .selected_text(self.lang_choice.clone())
                .show_ui(ui, |ui| {
                    for choice in LANGUAGE_CHOICES {
                        ui.selectable_value(&mut self.lang_choice, choice.to_string(), choice);
                    }
                });
            if self.lang_choice != before {
                let choice = self.lang_choice.clone();
                self.change_language(&choice);
            }
        });
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::GUI_INPUT_HEADING));
        ui.add_space(8.0);
        egui::Grid::new("input_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for (idx, field) in ConfigField::ALL.into_iter().enumerate() {
                    ui.label(tr.t(field_label_key(field)));
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut self.field_inputs[idx])
                            .desired_width(120.0)
                            .hint_text(field_hint(field)),
                    );
                    if resp.changed() {
                        self.apply_field_input(idx, field);
                    }
                    ui.end_row();
                    if let Some(err) = &self.field_errors[idx] {
                        ui.label("");
                        ui.colored_label(ui.visuals().error_fg_color, err);
                        ui.end_row();
                    }
                }
            });
    }

    fn ui_points(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::GUI_POINTS_HEADING));
        let Some(points) = self.current_points() else {
            ui.label(tr.t(keys::GUI_NEEDS_INPUT));
            return;
        };
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::GUI_AXES));
            let before = self.axes;
            ui.radio_value(&mut self.axes, AxisCount::One, tr.t(keys::GUI_AXIS_ONE));
            ui.radio_value(&mut self.axes, AxisCount::Two, tr.t(keys::GUI_AXIS_TWO));
            if self.axes != before {
                self.result = None;
            }
        });
        for axis in self.reading_inputs.iter_mut() {
            axis.resize(points.len(), String::new());
        }
        let axis_count = self.axes.count();
        egui::ScrollArea::vertical()
            .id_source("points_scroll")
            .max_height(260.0)
            .show(ui, |ui| {
                egui::Grid::new("points_grid")
                    .num_columns(2 + axis_count)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.strong("#");
                        ui.strong(tr.t(keys::GUI_DEPTH));
                        for axis in 1..=axis_count {
                            ui.strong(format!("{} {axis} [Pa]", tr.t(keys::GUI_AXES)));
                        }
                        ui.end_row();
                        for (idx, depth) in points.iter().enumerate() {
                            ui.label(format!("{}", idx + 1));
                            ui.label(format!("{depth}"));
                            for axis in self.reading_inputs.iter_mut().take(axis_count) {
                                let resp = ui.add(
                                    egui::TextEdit::singleline(&mut axis[idx]).desired_width(70.0),
                                );
                                if resp.changed() {
                                    self.result = None;
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
        ui.add_space(8.0);
        let ready = self.measurement.is_complete();
        if ui
            .add_enabled(ready, egui::Button::new(tr.t(keys::GUI_CALCULATE)))
            .clicked()
        {
            self.run_calculation();
        }
    }

    fn ui_result(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let Some(result) = self.result.clone() else {
            return;
        };
        ui.heading(tr.t(keys::GUI_RESULT_HEADING));
        ui.label(tr.tf(
            keys::RESULT_ABSOLUTE_PRESSURE,
            &[("value", format!("{:.1}", result.absolute_pressure_pa))],
        ));
        ui.label(tr.tf(
            keys::RESULT_DENSITY,
            &[("value", format!("{:.4}", result.density_kg_per_m3))],
        ));
        ui.label(tr.tf(
            keys::RESULT_MEAN_VELOCITY,
            &[("value", format!("{:.3}", result.mean_velocity_m_per_s))],
        ));
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::GUI_RESULT_UNIT));
            egui::ComboBox::from_id_source("result_unit")
                .selected_text(self.result_unit.symbol())
                .show_ui(ui, |ui| {
                    for unit in ResultUnit::ALL {
                        ui.selectable_value(&mut self.result_unit, unit, unit.symbol());
                    }
                });
        });
        ui.label(
            egui::RichText::new(format!(
                "{} {}",
                result.value_in(self.result_unit),
                self.result_unit.symbol()
            ))
            .size(24.0)
            .strong(),
        );
        ui.add_space(6.0);
        egui::CollapsingHeader::new(tr.t(keys::GUI_POINT_VELOCITY))
            .default_open(false)
            .show(ui, |ui| {
                egui::Grid::new("velocity_grid").striped(true).show(ui, |ui| {
                    for (idx, v) in result.point_velocities_m_per_s.iter().enumerate() {
                        ui.label(format!("{}", idx + 1));
                        ui.label(format!("{v:.3}"));
                        ui.end_row();
                    }
                });
            });
    }
}

fn field_hint(field: ConfigField) -> &'static str {
    match field {
        ConfigField::Temperature => "°C",
        ConfigField::AmbientPressure => "hPa",
        ConfigField::StaticPressure => "Pa",
        ConfigField::PrandtlCoefficient => "0.81 / 1.0",
        ConfigField::DuctDiameter => "mm",
        ConfigField::SampleCount => "3-5",
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.ui_top_bar(ui);
        });
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.status.clone().unwrap_or_default());
        });
        egui::SidePanel::left("inputs")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                self.ui_inputs(ui);
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.ui_points(ui);
                ui.separator();
                self.ui_result(ui);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_hints_follow_input_units() {
        assert_eq!(field_hint(ConfigField::DuctDiameter), "mm");
        assert_eq!(field_hint(ConfigField::SampleCount), "3-5");
    }
}
