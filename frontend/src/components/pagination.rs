use crate::tables::page_window;
use leptos::*;

/// Tira de paginación: primero/anterior, hasta cinco botones numerados
/// centrados en la página actual, siguiente/último.
#[component]
pub fn Pagination(
    #[prop(into)] current: Signal<usize>,
    #[prop(into)] total: Signal<usize>,
    on_page: Callback<usize>,
) -> impl IntoView {
    let at_first = move || current.get() <= 1;
    let at_last = move || current.get() >= total.get();
    let nav_class = "px-3 py-1 rounded border border-gray-300 text-sm text-gray-700 disabled:opacity-40 disabled:cursor-not-allowed hover:bg-gray-100";

    view! {
        <Show when=move || { total.get() > 1 }>
            <div class="flex items-center justify-center gap-1 py-3">
                <button
                    class=nav_class
                    disabled=at_first
                    on:click=move |_| on_page.call(1)
                >
                    "«"
                </button>
                <button
                    class=nav_class
                    disabled=at_first
                    on:click=move |_| on_page.call(current.get().saturating_sub(1).max(1))
                >
                    "‹"
                </button>
                {move || {
                    page_window(current.get(), total.get())
                        .into_iter()
                        .map(|page| {
                            let is_current = move || current.get() == page;
                            view! {
                                <button
                                    class="px-3 py-1 rounded border text-sm"
                                    class=("bg-[#16469B]", is_current)
                                    class=("text-white", is_current)
                                    class=("border-[#16469B]", is_current)
                                    class=("border-gray-300", move || !is_current())
                                    class=("text-gray-700", move || !is_current())
                                    on:click=move |_| on_page.call(page)
                                >
                                    {page}
                                </button>
                            }
                        })
                        .collect_view()
                }}
                <button
                    class=nav_class
                    disabled=at_last
                    on:click=move |_| on_page.call((current.get() + 1).min(total.get()))
                >
                    "›"
                </button>
                <button
                    class=nav_class
                    disabled=at_last
                    on:click=move |_| on_page.call(total.get())
                >
                    "»"
                </button>
            </div>
        </Show>
    }
}
