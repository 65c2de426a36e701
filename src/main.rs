use yew_flipbook::components::app::App;
use yew_flipbook::util::init_logging;

fn main() {
    init_logging(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
