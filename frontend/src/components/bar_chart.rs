use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::format::{format_currency, truncate};
use shared::{CategorySales, TopSeller};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 350;
const LABEL_WIDTH: usize = 14;

/// One labelled bar
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// What the y axis shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Revenue,
    Units,
}

impl Measure {
    fn label(self) -> &'static str {
        match self {
            Measure::Revenue => "Total Sales ($)",
            Measure::Units => "Units Sold",
        }
    }

    fn format(self, value: f64) -> String {
        match self {
            Measure::Revenue => format_currency(value),
            Measure::Units => format!("{:.0}", value),
        }
    }
}

pub fn category_bars(rows: &[CategorySales], measure: Measure) -> Vec<Bar> {
    rows.iter()
        .map(|row| Bar {
            label: row.category_name.clone().unwrap_or_else(|| "Uncategorized".to_string()),
            value: match measure {
                Measure::Revenue => row.total_sales_value,
                Measure::Units => row.total_quantity_sold as f64,
            },
        })
        .collect()
}

pub fn top_seller_bars(rows: &[TopSeller], measure: Measure) -> Vec<Bar> {
    rows.iter()
        .map(|row| Bar {
            label: row.product_name.clone().unwrap_or_else(|| "Unknown".to_string()),
            value: match measure {
                Measure::Revenue => row.total_sales,
                Measure::Units => row.total_quantity_sold as f64,
            },
        })
        .collect()
}

/// Upper bound of the value axis, with headroom above the tallest bar
fn value_ceiling(bars: &[Bar]) -> f64 {
    let max = bars
        .iter()
        .map(|bar| bar.value)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

#[derive(Properties, PartialEq)]
pub struct BarChartProps {
    pub bars: Vec<Bar>,
    pub measure: Measure,
    #[prop_or(AttrValue::from("No data available for chart"))]
    pub empty_message: AttrValue,
}

pub struct BarChart {
    canvas_ref: NodeRef,
}

impl Component for BarChart {
    type Message = ();
    type Properties = BarChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, _ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if !ctx.props().bars.is_empty() {
            self.draw_chart(&ctx.props().bars, ctx.props().measure);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="chart-container">
                {if props.bars.is_empty() {
                    html! { <div class="chart-empty"><p>{props.empty_message.clone()}</p></div> }
                } else {
                    html! {
                        <canvas
                            ref={self.canvas_ref.clone()}
                            class="bar-chart-canvas"
                            width={CHART_WIDTH.to_string()}
                            height={CHART_HEIGHT.to_string()}
                        ></canvas>
                    }
                }}
            </div>
        }
    }
}

impl BarChart {
    fn draw_chart(&self, bars: &[Bar], measure: Measure) {
        if bars.is_empty() {
            return;
        }

        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };
        canvas.set_width(CHART_WIDTH);
        canvas.set_height(CHART_HEIGHT);

        let backend = match CanvasBackend::with_canvas_object(canvas) {
            Some(backend) => backend,
            None => return,
        };
        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let count = bars.len() as u32;
        let labels: Vec<String> = bars.iter().map(|bar| truncate(&bar.label, LABEL_WIDTH)).collect();

        let mut chart = match ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(80)
            .build_cartesian_2d((0u32..count).into_segmented(), 0.0..value_ceiling(bars))
        {
            Ok(chart) => chart,
            Err(_) => return,
        };

        let x_labels = |v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        };
        let y_labels = |v: &f64| measure.format(*v);

        if chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc(measure.label())
            .x_labels(bars.len())
            .x_label_formatter(&x_labels)
            .y_label_formatter(&y_labels)
            .label_style(("sans-serif", 12, &RGBColor(75, 85, 99)))
            .axis_style(RGBColor(230, 230, 230))
            .bold_line_style(RGBColor(240, 240, 240))
            .light_line_style(RGBColor(250, 250, 250))
            .draw()
            .is_err()
        {
            return;
        }

        let bar_color = match measure {
            Measure::Revenue => RGBColor(75, 192, 192),
            Measure::Units => RGBColor(54, 162, 235),
        };

        if chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(bar_color.filled())
                    .margin(12)
                    .data(bars.iter().enumerate().map(|(i, bar)| (i as u32, bar.value))),
            )
            .is_err()
        {
            return;
        }

        let _ = root.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales(name: Option<&str>, quantity: i64, value: f64) -> CategorySales {
        CategorySales {
            category_name: name.map(str::to_string),
            total_quantity_sold: quantity,
            total_sales_value: value,
        }
    }

    #[test]
    fn test_category_bars_pick_measure() {
        let rows = vec![sales(Some("Tools"), 4, 120.5), sales(None, 2, 10.0)];

        let revenue = category_bars(&rows, Measure::Revenue);
        assert_eq!(revenue[0], Bar { label: "Tools".into(), value: 120.5 });
        assert_eq!(revenue[1].label, "Uncategorized");

        let units = category_bars(&rows, Measure::Units);
        assert_eq!(units[1].value, 2.0);
    }

    #[test]
    fn test_top_seller_bars_fall_back_to_unknown() {
        let rows = vec![TopSeller {
            product_id: Some(3),
            product_name: None,
            total_quantity_sold: 9,
            total_sales: 45.0,
        }];
        let bars = top_seller_bars(&rows, Measure::Units);
        assert_eq!(bars, vec![Bar { label: "Unknown".into(), value: 9.0 }]);
    }

    #[test]
    fn test_value_ceiling() {
        assert_eq!(value_ceiling(&[]), 1.0);
        let bars = vec![Bar { label: "a".into(), value: 100.0 }, Bar { label: "b".into(), value: f64::NAN }];
        assert!((value_ceiling(&bars) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_measure_axis_format() {
        assert_eq!(Measure::Revenue.format(1234.5), "$1,234.50");
        assert_eq!(Measure::Units.format(12.0), "12");
    }

    #[test]
    fn test_draw_chart_without_canvas_is_a_no_op() {
        let chart = BarChart {
            canvas_ref: NodeRef::default(),
        };
        chart.draw_chart(&[Bar { label: "a".into(), value: 1.0 }], Measure::Units);
    }
}
