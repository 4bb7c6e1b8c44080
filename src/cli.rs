use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::{
    BrandPage, BrandSelection, CarDetailPage, DetailView, GridView, HomePage, InquiryFormController, SubmitOutcome,
};
use crate::client::{CarFilter, ClientFactory, DataClient};
use crate::config::AppConfig;
use crate::logging::init_logging;
use crate::models::{CarSummary, InquiryField};
use crate::notifications::{NotificationCenter, NotificationSpec};

/// carctl - browse the vintage car catalog from the terminal
#[derive(Parser)]
#[command(name = "carctl")]
#[command(about = "Browse vintage cars and send collector inquiries")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to <config dir>/carctl/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use the built-in mock catalog
    #[arg(long, global = true, conflicts_with = "live")]
    pub mock: bool,

    /// Use the live REST backend
    #[arg(long, global = true)]
    pub live: bool,

    /// Base URL of the live backend
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show brands and featured vehicles
    Home,
    /// List all brands
    Brands,
    /// Show the listing for one brand, or "all"
    Brand { brand: String },
    /// List cars with optional filters
    Cars {
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        featured: Option<bool>,
    },
    /// Show one car with its gallery
    Car { id: String },
    /// Send an inquiry about a car
    Inquire {
        car: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        message: String,
    },
}

impl Cli {
    /// Resolve configuration: file, then environment, then flags
    fn load_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref()).context("Failed to load configuration")?;

        if self.mock {
            config.api.use_mock = true;
        }
        if self.live {
            config.api.use_mock = false;
        }
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(&config.logging.level);

    let client = ClientFactory::create_client(&config)?;
    let notifications = NotificationCenter::new();

    let result = match cli.command {
        Commands::Home => show_home(client.as_ref(), &notifications).await,
        Commands::Brands => list_brands(client.as_ref()).await,
        Commands::Brand { brand } => show_brand(client.as_ref(), &notifications, &brand).await,
        Commands::Cars { brand, featured } => list_cars(client.as_ref(), CarFilter { brand, featured }).await,
        Commands::Car { id } => show_car(client.as_ref(), &id).await,
        Commands::Inquire {
            car,
            name,
            email,
            phone,
            message,
        } => {
            let mut controller = InquiryFormController::new(car);
            controller.edit(InquiryField::CollectorName, name);
            controller.edit(InquiryField::CollectorEmail, email);
            controller.edit(InquiryField::CollectorPhone, phone.unwrap_or_default());
            controller.edit(InquiryField::Message, message);
            send_inquiry(client.as_ref(), &notifications, controller).await
        }
    };

    print_notifications(&notifications).await;
    notifications.shutdown();
    result
}

async fn print_notifications(notifications: &NotificationCenter) {
    let entries: Vec<_> = notifications.snapshot().await.into_iter().filter(|n| n.is_open()).collect();
    if entries.is_empty() {
        return;
    }
    println!();
    for notification in &entries {
        println!("{}", notification.render());
    }
}

async fn warn_failures(notifications: &NotificationCenter, failures: &[&str]) {
    for failure in failures {
        notifications
            .enqueue(NotificationSpec::warning("Could not load listings").with_description(*failure))
            .await;
    }
}

fn car_line(car: &CarSummary) -> String {
    let mut line = format!("  🚗 [{}] {} - {}", car.id, car.title(), car.price);
    if car.is_featured {
        line.push_str(" ⭐ Featured");
    }
    if let Some((badge, tone)) = car.status.card_badge() {
        line.push_str(&format!(" {} {}", tone.icon(), badge));
    }
    line
}

fn print_car(car: &CarSummary) {
    println!("{}", car_line(car));
}

fn print_grid(grid: &GridView<'_>) {
    match grid {
        GridView::Skeleton { .. } => println!("  ⏳ Loading..."),
        GridView::Empty(empty) => {
            println!("  📭 {}", empty.title);
            println!("     {}", empty.description);
        }
        GridView::Populated(cars) => {
            for car in cars.iter() {
                print_car(car);
            }
        }
    }
}

async fn show_home(client: &dyn DataClient, notifications: &NotificationCenter) -> Result<()> {
    println!("🏁 Vintage car catalog ({} data)", client.get_name());

    let mut page = HomePage::new();
    page.load(client).await;

    println!("\n🏷️  Browse by brand:");
    match page.brand_list() {
        Some([]) => println!("  📭 No brands available"),
        Some(brands) => {
            for brand in brands {
                println!("  • {} ({})", brand.name, brand.id);
            }
        }
        None => println!("  ⏳ Loading..."),
    }

    println!("\n⭐ Featured vehicles:");
    print_grid(&page.featured_grid());

    warn_failures(notifications, &page.failures()).await;
    Ok(())
}

async fn list_brands(client: &dyn DataClient) -> Result<()> {
    println!("🏷️  Listing brands...");

    let brands = client.list_brands().await.context("Failed to list brands")?;
    if brands.is_empty() {
        println!("📭 No brands available");
        return Ok(());
    }

    println!("✅ Found {} brand(s):", brands.len());
    for brand in brands {
        println!("  🏷️  {} ({})", brand.name, brand.id);
        if !brand.description.is_empty() {
            println!("     {}", brand.description);
        }
    }
    Ok(())
}

async fn show_brand(client: &dyn DataClient, notifications: &NotificationCenter, brand: &str) -> Result<()> {
    let mut page = BrandPage::new(BrandSelection::parse(brand));
    page.open(client).await;

    println!("🏷️  {}", page.title());
    if let Some(description) = page.description() {
        println!("   {}", description);
    }

    let options = page.filter_options();
    if !options.is_empty() {
        let labels: Vec<String> = options
            .iter()
            .map(|option| {
                if option.selected {
                    format!("[{}]", option.label)
                } else {
                    option.label.clone()
                }
            })
            .collect();
        println!("\n🔎 Filter by brand: {}", labels.join("  "));
    }

    println!("\n📋 {}", page.count_heading());
    print_grid(&page.grid());

    let failures: Vec<&str> = [page.brands.failure(), page.cars.failure()]
        .into_iter()
        .flatten()
        .collect();
    warn_failures(notifications, &failures).await;
    Ok(())
}

async fn list_cars(client: &dyn DataClient, filter: CarFilter) -> Result<()> {
    println!("📋 Listing cars...");

    let cars = client.list_cars(&filter).await.context("Failed to list cars")?;
    if cars.is_empty() {
        println!("📭 No cars match the filter");
        return Ok(());
    }

    println!("✅ Found {} car(s):", cars.len());
    for car in &cars {
        print_car(car);
    }
    Ok(())
}

async fn show_car(client: &dyn DataClient, id: &str) -> Result<()> {
    let mut page = CarDetailPage::new(id);
    page.load(client).await;

    match &page.view {
        DetailView::Loading => println!("⏳ {}", page.heading()),
        DetailView::NotFound { message } => {
            println!("❌ {}", page.heading());
            println!("   {}", message);
            if let Some(action) = page.action() {
                println!("   💡 {}: carctl home", action.label);
            }
        }
        DetailView::Ready { car, gallery } => {
            println!("🚗 {}", car.title());
            println!("   💰 {}", car.price);
            println!("   📌 Status: {} {}", car.status.tone().icon(), car.status.label());
            if car.is_featured {
                println!("   ⭐ Featured");
            }
            if !car.description.is_empty() {
                println!("\n   {}", car.description);
            }

            println!("\n🖼️  Gallery:");
            if gallery.is_empty() {
                println!("   📭 No images available");
            }
            for (index, image) in gallery.images().iter().enumerate() {
                let marker = if index == gallery.active_index() { "▶" } else { " " };
                println!("   {} {} {}", marker, image.image_url, image.alt_text);
            }
            if gallery.has_controls() {
                println!("   {}", gallery.counter());
            }
        }
    }
    Ok(())
}

async fn send_inquiry(
    client: &dyn DataClient,
    notifications: &NotificationCenter,
    mut controller: InquiryFormController,
) -> Result<()> {
    println!("✉️  Sending inquiry about car {}...", controller.form().car);

    match controller.submit(client, notifications).await {
        SubmitOutcome::Sent(inquiry) => {
            println!("✅ Inquiry {} recorded for car {}", inquiry.id, inquiry.car);
            Ok(())
        }
        SubmitOutcome::Invalid => {
            println!("❌ Please fix the following:");
            for (field, message) in controller.errors().iter() {
                println!("   • {}: {}", field.label(), message);
            }
            anyhow::bail!("Inquiry form is invalid")
        }
        SubmitOutcome::InFlight => anyhow::bail!("An inquiry is already being sent"),
        SubmitOutcome::Failed(e) => Err(anyhow::Error::new(e).context("Failed to send inquiry")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;
    use crate::models::CarStatus;

    #[test]
    fn test_car_line_shows_badge_tone() {
        let mut car = fixtures::cars()[0].clone();
        car.status = CarStatus::Sold;
        assert!(car_line(&car).ends_with(" 🔴 Sold"));

        car.status = CarStatus::Draft;
        assert!(car_line(&car).ends_with(" 🔵 Draft"));
    }

    #[test]
    fn test_active_car_has_no_badge() {
        let mut car = fixtures::cars()[0].clone();
        car.status = CarStatus::Active;
        car.is_featured = true;
        assert!(car_line(&car).ends_with(" ⭐ Featured"));
    }
}
