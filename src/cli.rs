use std::fmt::Display;

use chrono::{Local, Weekday};
use enum_iterator::all;
use inquire::{error::InquireResult, Confirm, DateSelect, InquireError, MultiSelect, Select, Text};
use log::warn;

use crate::{
    catalog::Catalog,
    draft::{self, DraftStore, OrderDraft, OrderSink, Requirement, SubmitOutcome},
};

/// Пункты меню сессии.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, enum_iterator::Sequence)]
pub enum MenuItem {
    #[display(fmt = "Выбрать клиента")]
    Client,
    #[display(fmt = "Выбрать товары")]
    Products,
    #[display(fmt = "Указать количество")]
    Amounts,
    #[display(fmt = "Указать срок")]
    Deadline,
    #[display(fmt = "Оформить заказ")]
    Submit,
    #[display(fmt = "Сбросить черновик")]
    Reset,
    #[display(fmt = "Выход")]
    Quit,
}

/// Запускает интерактивное составление заказа.
/// Сессия длится пока пользователь не выберет выход.
pub fn run<S: OrderSink + ?Sized>(mut catalog: Catalog, sink: &S) -> anyhow::Result<()> {
    let mut store = DraftStore::new();

    loop {
        println!("\n{}", Summary(store.draft()));

        let menu = Select::new("Что делаем?", all::<MenuItem>().collect()).prompt();

        let Some(item) = skippable(menu)? else {
            break;
        };

        match item {
            MenuItem::Client => ask_client(&mut store, &catalog)?,
            MenuItem::Products => ask_products(&mut store, &catalog)?,
            MenuItem::Amounts => ask_amounts(&mut store)?,
            MenuItem::Deadline => ask_deadline(&mut store)?,
            MenuItem::Submit => submit(&mut store, &mut catalog, sink)?,
            MenuItem::Reset => ask_reset(&mut store)?,
            MenuItem::Quit => break,
        }
    }

    Ok(())
}

// Esc в любом вопросе просто возвращает в меню.
fn skippable<T>(res: InquireResult<T>) -> anyhow::Result<Option<T>> {
    match res {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn ask_client(store: &mut DraftStore, catalog: &Catalog) -> anyhow::Result<()> {
    let clients = catalog.clients();
    if clients.is_empty() {
        println!("Нет ни одного клиента");
        return Ok(());
    }

    let cursor = store
        .draft()
        .client()
        .and_then(|current| clients.iter().position(|c| c.id == current.id))
        .unwrap_or_default();

    let prompt = Select::new("Клиент", clients.to_vec()).with_starting_cursor(cursor);

    if let Some(client) = skippable(prompt.prompt())? {
        store.select_client(client);
    }

    Ok(())
}

fn ask_products(store: &mut DraftStore, catalog: &Catalog) -> anyhow::Result<()> {
    let products = catalog.products();
    if products.is_empty() {
        println!("Нет ни одного товара");
        return Ok(());
    }

    // Уже выбранные товары остаются отмеченными.
    let selected: Vec<usize> = products
        .iter()
        .enumerate()
        .filter(|(_, p)| store.draft().lines().iter().any(|l| l.id == p.id))
        .map(|(idx, _)| idx)
        .collect();

    let prompt = MultiSelect::new("Товары", products.to_vec()).with_default(&selected);

    if let Some(selection) = skippable(prompt.prompt())? {
        store.select_products(selection);
    }

    Ok(())
}

fn ask_amounts(store: &mut DraftStore) -> anyhow::Result<()> {
    let lines = store.draft().lines().to_vec();
    if lines.is_empty() {
        println!("Сначала выберите товары");
        return Ok(());
    }

    for line in lines {
        let title = format!("{} (в наличии {})", line.name, line.available_amount);
        let default = line.buying.unwrap_or(draft::DEFAULT_AMOUNT).to_string();

        let prompt = Text::new(&title).with_default(&default);

        let Some(input) = skippable(prompt.prompt())? else {
            break;
        };

        store.set_line_amount(line.id, draft::parse_amount(&input));
    }

    Ok(())
}

fn ask_deadline(store: &mut DraftStore) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let current = store.draft().deadline().unwrap_or(today).max(today);

    let prompt = DateSelect::new("Срок исполнения")
        .with_min_date(today)
        .with_default(current)
        .with_week_start(Weekday::Mon);

    if let Some(deadline) = skippable(prompt.prompt())? {
        store.set_deadline(deadline);
    }

    Ok(())
}

fn submit<S: OrderSink + ?Sized>(
    store: &mut DraftStore,
    catalog: &mut Catalog,
    sink: &S,
) -> anyhow::Result<()> {
    if store.is_submittable() {
        let prompt = Confirm::new("Оформить заказ?").with_default(true);
        if skippable(prompt.prompt())? != Some(true) {
            return Ok(());
        }

        println!("Оформляем заказ...");
    }

    match store.submit(sink) {
        Ok(SubmitOutcome::Withheld(missing)) => {
            println!("Перед оформлением заполните: {}", Requirements(&missing));
        }
        Ok(SubmitOutcome::Committed(order)) => {
            catalog.apply_committed(&order);

            println!(
                "Заказ {} зарегистрирован: {}, сумма $ {:.2}, статус: {}",
                order.id, order.client, order.total, order.state
            );
        }
        Err(e) => {
            warn!("Не удалось оформить заказ: {:?}", e);

            println!(
                "Не удалось оформить заказ: {}. Черновик сохранён, можно исправить и повторить",
                e
            );
        }
    }

    Ok(())
}

fn ask_reset(store: &mut DraftStore) -> anyhow::Result<()> {
    let prompt = Confirm::new("Сбросить черновик?").with_default(false);

    if skippable(prompt.prompt())? == Some(true) {
        store.reset();
    }

    Ok(())
}

/// Текстовое представление черновика.
pub struct Summary<'a>(pub &'a OrderDraft);

impl Display for Summary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let draft = self.0;

        match draft.client() {
            Some(client) => writeln!(f, "Клиент: {}", client)?,
            None => writeln!(f, "Клиент: не выбран")?,
        }

        if draft.lines().is_empty() {
            writeln!(f, "Товары: не выбраны")?;
        } else {
            writeln!(f, "Товары:")?;
            for line in draft.lines() {
                match line.buying {
                    Some(buying) => writeln!(
                        f,
                        "  {} ($ {:.2}) × {}",
                        line.name,
                        line.price.get(),
                        buying
                    )?,
                    None => writeln!(f, "  {} ($ {:.2}) × ?", line.name, line.price.get())?,
                }
            }
        }

        writeln!(f, "Итого: $ {:.2}", draft.total())?;

        match draft.deadline() {
            Some(deadline) => writeln!(f, "Срок: {}", deadline.format("%d.%m.%Y"))?,
            None => writeln!(f, "Срок: не указан")?,
        }

        let missing = draft::missing(draft);
        if missing.is_empty() {
            write!(f, "Можно оформлять")
        } else {
            write!(f, "Не хватает: {}", Requirements(&missing))
        }
    }
}

struct Requirements<'a>(&'a [Requirement]);

impl Display for Requirements<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, requirement) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", requirement)?;
        }
        Ok(())
    }
}
